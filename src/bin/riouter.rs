fn main() -> anyhow::Result<()> {
    riouter::cli::run_cli()
}
