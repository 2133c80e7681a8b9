use folio::Cli;

fn main() -> anyhow::Result<()> {
    Cli::run()
}
