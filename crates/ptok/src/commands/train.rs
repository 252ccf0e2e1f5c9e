use std::{
    fs::File,
    io::{BufRead, BufReader},
};

use pairtok::{training::VocabularyBuilder, vocab::io::write_json_token_map};

use crate::{config::ConfigArgs, input_output::OutputArgs, logging::LogArgs};

/// Args for the train command.
#[derive(clap::Args, Debug)]
pub struct TrainArgs {
    /// Files to process.
    files: Vec<String>,

    /// Number of merge rules to learn (at most `max_vocab_size`).
    #[arg(long, default_value = "1000")]
    target_size: usize,

    #[command(flatten)]
    config: ConfigArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[command(flatten)]
    logging: LogArgs,
}

/// Read the non-empty lines of every file.
fn read_corpus(files: &[String]) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut corpus = Vec::new();
    for path in files {
        log::info!("reading: {path}");
        let reader = BufReader::new(File::open(path)?);
        for line in reader.lines() {
            let line = line?;
            if !line.is_empty() {
                corpus.push(line);
            }
        }
    }
    Ok(corpus)
}

impl TrainArgs {
    /// Run the train command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        let options = self.config.load_options()?;
        let corpus = read_corpus(&self.files)?;
        log::info!("corpus: {} items", corpus.len());

        let vocab = VocabularyBuilder::new(options).build_from_corpus(&corpus, self.target_size)?;
        log::info!(
            "vocabulary: {} tokens, {} merge rules",
            vocab.len(),
            vocab.merge_rule_count()
        );

        let mut writer = self.output.open_writer()?;
        write_json_token_map(&vocab.to_token_map(), &mut writer)?;
        Ok(())
    }
}
