fn main() -> anyhow::Result<()> {
    devpilot::cli::run()
}
