fn main() -> anyhow::Result<()> {
    conversation_splitter::cli::run()
}
