use std::collections::HashMap;

use crate::error::PipelineError;

/// Maps file extensions to the interpreter command used to run them.
///
/// Keys include the leading dot and are matched exactly as split off the file
/// name; no case folding is applied, so `.R` and `.r` are distinct entries.
/// Values are command tokens; the target file name is appended after the last
/// token when the invocation is built.
#[derive(Debug, Clone)]
pub struct ExtensionMap {
    commands: HashMap<String, Vec<String>>,
}

impl ExtensionMap {
    /// The built-in extension table:
    ///
    /// | extension | command |
    /// |---|---|
    /// | `.hql` | `hive -f` |
    /// | `.py` | `python` |
    /// | `.R` | `Rscript` |
    /// | `.scala` | `scala` |
    /// | `.sh` | `bash` |
    pub fn defaults() -> Self {
        let defaults: [(&str, &[&str]); 5] = [
            (".hql", &["hive", "-f"]),
            (".py", &["python"]),
            (".R", &["Rscript"]),
            (".scala", &["scala"]),
            (".sh", &["bash"]),
        ];
        let commands = defaults
            .into_iter()
            .map(|(ext, tokens)| {
                (
                    ext.to_owned(),
                    tokens.iter().map(|t| (*t).to_owned()).collect(),
                )
            })
            .collect();
        Self { commands }
    }

    /// The defaults plus caller-supplied entries.
    ///
    /// Caller entries win key-by-key; defaults for extensions not mentioned
    /// survive untouched.
    pub fn with_overrides<I, K>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<String>)>,
        K: Into<String>,
    {
        let mut map = Self::defaults();
        for (extension, command) in overrides {
            map.insert(extension, command);
        }
        map
    }

    /// Register or replace the command for one extension.
    pub fn insert(&mut self, extension: impl Into<String>, command: Vec<String>) {
        self.commands.insert(extension.into(), command);
    }

    /// The command tokens mapped to `extension`, if any.
    pub fn get(&self, extension: &str) -> Option<&[String]> {
        self.commands.get(extension).map(Vec::as_slice)
    }

    /// Build the full invocation for a file: the mapped command tokens with
    /// the file name appended as the final token.
    ///
    /// A name whose extension (or lack of one) is absent from the map cannot
    /// be run at all, so this fails rather than guessing an interpreter.
    pub fn command_for(&self, file_name: &str) -> Result<Vec<String>, PipelineError> {
        let extension = extension_of(file_name);
        match self.commands.get(extension) {
            Some(tokens) => {
                let mut command = tokens.clone();
                command.push(file_name.to_owned());
                Ok(command)
            }
            None => Err(PipelineError::UnknownExtension {
                file: file_name.to_owned(),
                extension: extension.to_owned(),
            }),
        }
    }
}

impl Default for ExtensionMap {
    fn default() -> Self {
        Self::defaults()
    }
}

/// Extension of a file name: the substring from its last `.` on, dot
/// included. Empty for names without a dot.
fn extension_of(name: &str) -> &str {
    name.rfind('.').map(|i| &name[i..]).unwrap_or("")
}
