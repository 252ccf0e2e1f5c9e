use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

use pairtok::{TokenId, Tokenizer};

use crate::{
    config::ConfigArgs,
    input_output::{InputArgs, OutputArgs},
    logging::LogArgs,
};

/// Args for the decode command.
#[derive(clap::Args, Debug)]
pub struct DecodeArgs {
    /// Vocabulary to decode with.
    #[arg(long)]
    vocab: PathBuf,

    #[command(flatten)]
    config: ConfigArgs,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    logging: LogArgs,
}

/// Parse a line of whitespace separated token ids.
pub fn parse_ids(line: &str) -> Result<Vec<TokenId>, std::num::ParseIntError> {
    line.split_whitespace().map(str::parse).collect()
}

impl DecodeArgs {
    /// Run the decode command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let tokenizer = Tokenizer::new(self.config.load_options()?)?;
        tokenizer.load_vocabulary(&self.vocab)?;

        let reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let ids = parse_ids(&line)
                .map_err(|err| format!("line {}: invalid token id: {err}", idx + 1))?;
            writeln!(writer, "{}", tokenizer.decode_ids(&ids)?)?;
        }
        writer.flush()?;

        tokenizer.log_metrics();
        Ok(())
    }
}
