mod decode;
mod encode;
mod train;

/// Subcommands.
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Learn a vocabulary from text files, one corpus item per line.
    Train(train::TrainArgs),

    /// Encode lines of text to space separated token ids.
    Encode(encode::EncodeArgs),

    /// Decode lines of space separated token ids to text.
    Decode(decode::DecodeArgs),
}

impl Commands {
    /// Run the selected subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Train(cmd) => cmd.run(),
            Commands::Encode(cmd) => cmd.run(),
            Commands::Decode(cmd) => cmd.run(),
        }
    }
}
