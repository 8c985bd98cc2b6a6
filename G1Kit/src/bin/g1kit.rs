fn main() -> anyhow::Result<()> {
    g1kit::cli::run_cli()
}
