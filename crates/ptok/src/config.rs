use std::{fs::File, io::BufReader, path::PathBuf};

use pairtok::TokenizerOptions;

/// Tokenizer configuration arg group.
#[derive(clap::Args, Debug)]
pub struct ConfigArgs {
    /// Optional JSON file of tokenizer options; missing fields keep their defaults.
    #[clap(long)]
    pub config: Option<PathBuf>,
}

impl ConfigArgs {
    /// Load the configured [`TokenizerOptions`].
    pub fn load_options(&self) -> Result<TokenizerOptions, Box<dyn std::error::Error>> {
        let Some(path) = &self.config else {
            return Ok(TokenizerOptions::default());
        };

        let reader = BufReader::new(File::open(path)?);
        let options: TokenizerOptions = serde_json::from_reader(reader)?;
        log::info!("config: {}", path.display());
        log::debug!("{options:?}");
        Ok(options)
    }
}
