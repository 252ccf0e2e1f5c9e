//! # JSON Vocabulary IO
//!
//! Vocabularies persist as one flat JSON object:
//! ```terminaloutput
//! {"<TOKEN>": <ID>, ...}
//! ```
//! Keys are written sorted; merge rules and special flags are not stored.

use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Read, Write},
    path::Path,
};

use crate::{
    errors::{TokResult, TokenizerError},
    vocab::TokenMap,
};

fn map_json_error(err: serde_json::Error) -> TokenizerError {
    if err.is_io() {
        TokenizerError::Io(err.into())
    } else {
        TokenizerError::Corrupt(err.to_string())
    }
}

/// Load a [`TokenMap`] from a JSON vocab file.
///
/// ## Arguments
/// * `path` - the path to the vocabulary file.
///
/// ## Returns
/// [`TokenizerError::NotFound`] if the file does not exist.
pub fn load_json_token_map_path<P: AsRef<Path>>(path: P) -> TokResult<TokenMap> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => TokenizerError::NotFound {
            path: path.to_path_buf(),
        },
        _ => TokenizerError::Io(err),
    })?;
    read_json_token_map(BufReader::new(file))
}

/// Read a [`TokenMap`] from a JSON reader.
///
/// ## Arguments
/// * `reader` - the JSON source.
pub fn read_json_token_map<R: Read>(reader: R) -> TokResult<TokenMap> {
    serde_json::from_reader(reader).map_err(map_json_error)
}

/// Save a [`TokenMap`] to a JSON vocab file.
///
/// ## Arguments
/// * `token_map` - the vocabulary to save.
/// * `path` - the path to save the vocabulary to.
pub fn save_json_token_map_path<P: AsRef<Path>>(
    token_map: &TokenMap,
    path: P,
) -> TokResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_json_token_map(token_map, &mut writer)
}

/// Write a [`TokenMap`] to a [`Write`] writer.
///
/// ## Arguments
/// * `token_map` - the vocabulary to save.
/// * `writer` - the writer to target.
pub fn write_json_token_map<W: Write>(
    token_map: &TokenMap,
    writer: &mut W,
) -> TokResult<()> {
    serde_json::to_writer(&mut *writer, token_map).map_err(map_json_error)?;
    writer.flush()?;
    Ok(())
}
