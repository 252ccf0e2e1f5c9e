use std::{
    io::{BufRead, Write},
    path::PathBuf,
};

use pairtok::{CancellationToken, Token, Tokenizer};

use crate::{
    config::ConfigArgs,
    input_output::{InputArgs, OutputArgs},
    logging::LogArgs,
};

/// Args for the encode command.
#[derive(clap::Args, Debug)]
pub struct EncodeArgs {
    /// Vocabulary to load; new text elements are added as they are seen.
    #[arg(long)]
    vocab: Option<PathBuf>,

    /// Save the (possibly grown) vocabulary here when done.
    #[arg(long)]
    save_vocab: Option<PathBuf>,

    #[command(flatten)]
    config: ConfigArgs,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    logging: LogArgs,
}

/// Format token ids as one space separated line.
pub fn format_ids(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.id().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

impl EncodeArgs {
    /// Run the encode command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let tokenizer = Tokenizer::new(self.config.load_options()?)?;
        if let Some(path) = &self.vocab {
            tokenizer.load_vocabulary(path)?;
        }

        let reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;

        // The stream stops at the first read or write failure.
        let cancel = CancellationToken::new();
        let mut failure: Option<std::io::Error> = None;

        let lines = reader.lines().map_while(|line| match line {
            Ok(line) => Some(line),
            Err(err) => {
                failure = Some(err);
                None
            }
        });
        let mut write_error: Option<std::io::Error> = None;
        let progress = tokenizer.encode_stream(lines, &cancel, |tokens, progress| {
            if let Err(err) = writeln!(writer, "{}", format_ids(tokens)) {
                write_error = Some(err);
                cancel.cancel();
            }
            log::debug!(
                "line {}: {} tokens ({} total)",
                progress.items,
                tokens.len(),
                progress.processed_tokens
            );
        });

        if let Some(err) = write_error.or(failure) {
            return Err(err.into());
        }
        let progress = progress?;
        writer.flush()?;

        log::info!(
            "encoded {} lines to {} tokens",
            progress.items,
            progress.processed_tokens
        );
        tokenizer.log_metrics();

        if let Some(path) = &self.save_vocab {
            tokenizer.save_vocabulary(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_ids() {
        assert_eq!(format_ids(&[]), "");
        let tokens = vec![Token::new("a", 3, false), Token::new("bc", 17, false)];
        assert_eq!(format_ids(&tokens), "3 17");
    }
}
