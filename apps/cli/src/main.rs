fn main() -> anyhow::Result<()> {
    palabra_cli::run()
}
