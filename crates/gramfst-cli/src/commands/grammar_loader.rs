use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use gramfst_compiler::grammar::{GrammarDoc, LoadedGrammar};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("grammar is required: use positional argument or -g/--grammar")]
    MissingInput,

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("failed to read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Grammar(#[from] gramfst_compiler::Error),
}

/// Read the grammar document from inline text, stdin ("-") or a file.
pub fn load_grammar_text(path: Option<&Path>, text: Option<&str>) -> Result<String, LoadError> {
    if let Some(text) = text {
        return Ok(text.to_owned());
    }

    let Some(path) = path else {
        return Err(LoadError::MissingInput);
    };
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(LoadError::Stdin)?;
        return Ok(buf);
    }
    fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_owned(),
        source,
    })
}

/// Parse `json` and build its rules, compiling from `root` if given.
pub fn load_grammar(json: &str, root: Option<&str>) -> Result<LoadedGrammar, LoadError> {
    let mut doc = GrammarDoc::parse(json)?;
    if let Some(root) = root {
        root.clone_into(&mut doc.root);
    }
    Ok(doc.load()?)
}
