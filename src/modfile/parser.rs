//! Statement parser for go.mod files.

use super::lexer::{Line, Token, lex_line};
use super::version::{canonical_version, check_path_major, is_directory_path, is_go_version};
use super::{
    Exclude, Godebug, ModFile, ModuleRef, ParseError, ParseErrors, Replace, Require, Retract,
};
use tracing::debug;

/// Verbs that may open a `( ... )` block.
const BLOCK_VERBS: &[&str] =
    &["module", "require", "exclude", "replace", "retract", "godebug", "tool", "ignore"];

const REPLACE_USAGE: &str = "usage: replace module/path [v1.2.3] => other/module v1.4 \
                             or replace module/path [v1.2.3] => ../local/directory";

/// Parses go.mod content.
///
/// `file_name` is only used to prefix error messages.
///
/// # Errors
///
/// Returns every syntax or validation error found in the file.
///
/// # Examples
///
/// ```rust
/// use gomodpin::modfile::parse;
///
/// let data = b"module example.com/app\n\nrequire github.com/pkg/errors v0.9.1\n";
/// let file = parse("go.mod", data).unwrap();
/// assert_eq!(file.module.as_deref(), Some("example.com/app"));
/// assert_eq!(file.require[0].module.version, "v0.9.1");
/// ```
pub fn parse(file_name: &str, data: &[u8]) -> Result<ModFile, ParseErrors> {
    let mut parser = Parser::new(file_name);

    match std::str::from_utf8(data) {
        Ok(text) => parser.run(text.strip_prefix('\u{feff}').unwrap_or(text)),
        Err(e) => parser.error(1, format!("invalid UTF-8: {e}")),
    }

    parser.finish()
}

struct Block {
    verb: String,
    start: usize,
    supported: bool,
}

struct Parser<'a> {
    file_name: &'a str,
    file: ModFile,
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    fn new(file_name: &'a str) -> Self {
        Self {
            file_name,
            file: ModFile::default(),
            errors: Vec::new(),
        }
    }

    fn error(&mut self, line: usize, message: impl Into<String>) {
        self.errors.push(ParseError {
            file: self.file_name.to_string(),
            line,
            message: message.into(),
        });
    }

    fn finish(self) -> Result<ModFile, ParseErrors> {
        if self.errors.is_empty() {
            debug!(
                "Parsed {}: {} require, {} replace, {} exclude",
                self.file_name,
                self.file.require.len(),
                self.file.replace.len(),
                self.file.exclude.len()
            );
            Ok(self.file)
        } else {
            Err(ParseErrors {
                errors: self.errors,
            })
        }
    }

    fn run(&mut self, text: &str) {
        // Verb and opening line of the block being read, if any. Lines of a
        // block with an unsupported verb are skipped; the opener was reported.
        let mut block: Option<Block> = None;

        for (idx, raw) in text.lines().enumerate() {
            let number = idx + 1;
            let line = match lex_line(number, raw) {
                Ok(line) => line,
                Err(message) => {
                    self.error(number, message);
                    continue;
                }
            };
            if line.tokens.is_empty() {
                continue;
            }

            if let Some(open) = &block {
                let verb = open.verb.clone();
                let supported = open.supported;
                match line.tokens.as_slice() {
                    [Token::RParen] => block = None,
                    [.., Token::LParen] => {
                        self.error(number, "syntax error (blocks cannot be nested)");
                    }
                    _ if !supported => {}
                    args => self.directive(&verb, args, &line),
                }
                continue;
            }

            let verb = match &line.tokens[0] {
                Token::Word(word) => word.clone(),
                Token::RParen => {
                    self.error(number, "syntax error (unexpected ')')");
                    continue;
                }
                _ => {
                    self.error(number, "syntax error (expected directive)");
                    continue;
                }
            };

            match &line.tokens[1..] {
                [Token::LParen] => {
                    let supported = self.check_block_verb(&verb, number);
                    block = Some(Block {
                        verb,
                        start: number,
                        supported,
                    });
                }
                [Token::LParen, Token::RParen] => {
                    self.check_block_verb(&verb, number);
                }
                args => self.directive(&verb, args, &line),
            }
        }

        if let Some(Block {
            verb,
            start,
            ..
        }) = block
        {
            self.error(start, format!("syntax error (unterminated {verb} block)"));
        }
    }

    fn check_block_verb(&mut self, verb: &str, number: usize) -> bool {
        let supported = BLOCK_VERBS.contains(&verb);
        if !supported {
            self.error(number, format!("unknown block type: {verb}"));
        }
        supported
    }

    fn directive(&mut self, verb: &str, args: &[Token], line: &Line) {
        match verb {
            "module" => self.parse_module(args, line),
            "go" => self.parse_go(args, line),
            "toolchain" => self.parse_toolchain(args, line),
            "godebug" => self.parse_godebug(args, line),
            "require" => self.parse_require(args, line),
            "exclude" => self.parse_exclude(args, line),
            "replace" => self.parse_replace(args, line),
            "retract" => self.parse_retract(args, line),
            "tool" | "ignore" => self.parse_path_list(verb, args, line),
            _ => self.error(line.number, format!("unknown directive: {verb}")),
        }
    }

    /// Converts arguments to strings, rejecting stray punctuation.
    fn strings(&mut self, args: &[Token], line: &Line) -> Option<Vec<String>> {
        let mut values = Vec::with_capacity(args.len());
        for token in args {
            match token.value() {
                Some(value) => values.push(value.to_string()),
                None => {
                    self.error(
                        line.number,
                        format!("syntax error (unexpected {:?})", token.to_string()),
                    );
                    return None;
                }
            }
        }
        Some(values)
    }

    fn module_path(&mut self, verb: &str, path: &str, line: &Line) -> bool {
        if path.is_empty() || path.chars().any(|c| c.is_whitespace() || c.is_control()) {
            self.error(line.number, format!("{verb} {path:?}: invalid module path"));
            return false;
        }
        if is_directory_path(path) {
            self.error(
                line.number,
                format!("{verb} {path}: module path must not be a directory path"),
            );
            return false;
        }
        true
    }

    fn version(&mut self, verb: &str, path: &str, raw: &str, line: &Line) -> Option<String> {
        let canonical = canonical_version(raw);
        if canonical.is_none() {
            self.error(
                line.number,
                format!("{verb} {path}: invalid version {raw:?}: must be of the form v1.2.3"),
            );
        }
        canonical
    }

    /// Checks the version against the path's major-version suffix.
    fn path_major(&mut self, verb: &str, path: &str, version: &str, line: &Line) -> bool {
        match check_path_major(path, version) {
            Ok(()) => true,
            Err(message) => {
                self.error(line.number, format!("{verb} {path}: {message}"));
                false
            }
        }
    }

    fn parse_module(&mut self, args: &[Token], line: &Line) {
        let Some(values) = self.strings(args, line) else {
            return;
        };
        let [path] = values.as_slice() else {
            self.error(line.number, "usage: module module/path");
            return;
        };
        if self.file.module.is_some() {
            self.error(line.number, "repeated module statement");
            return;
        }
        if self.module_path("module", path, line) {
            self.file.module = Some(path.clone());
        }
    }

    fn parse_go(&mut self, args: &[Token], line: &Line) {
        let Some(values) = self.strings(args, line) else {
            return;
        };
        let [version] = values.as_slice() else {
            self.error(line.number, "usage: go 1.23");
            return;
        };
        if self.file.go.is_some() {
            self.error(line.number, "repeated go statement");
            return;
        }
        if !is_go_version(version) {
            self.error(
                line.number,
                format!("invalid go version '{version}': must match format 1.23.0"),
            );
            return;
        }
        self.file.go = Some(version.clone());
    }

    fn parse_toolchain(&mut self, args: &[Token], line: &Line) {
        let Some(values) = self.strings(args, line) else {
            return;
        };
        let [name] = values.as_slice() else {
            self.error(line.number, "usage: toolchain go1.23.0");
            return;
        };
        if self.file.toolchain.is_some() {
            self.error(line.number, "repeated toolchain statement");
            return;
        }
        self.file.toolchain = Some(name.clone());
    }

    fn parse_godebug(&mut self, args: &[Token], line: &Line) {
        let Some(values) = self.strings(args, line) else {
            return;
        };
        let setting = match values.as_slice() {
            [setting] => setting.split_once('='),
            _ => None,
        };
        match setting {
            Some((key, value)) if !key.is_empty() => self.file.godebug.push(Godebug {
                key: key.to_string(),
                value: value.to_string(),
            }),
            _ => self.error(line.number, "usage: godebug key=value"),
        }
    }

    fn parse_require(&mut self, args: &[Token], line: &Line) {
        let Some(values) = self.strings(args, line) else {
            return;
        };
        let [path, version] = values.as_slice() else {
            self.error(line.number, "usage: require module/path v1.2.3");
            return;
        };
        if !self.module_path("require", path, line) {
            return;
        }
        let Some(version) = self.version("require", path, version, line) else {
            return;
        };
        if !self.path_major("require", path, &version, line) {
            return;
        }

        let indirect = line
            .comment
            .as_deref()
            .is_some_and(|c| c == "indirect" || c.starts_with("indirect;"));

        self.file.require.push(Require {
            module: ModuleRef::new(path.clone(), version),
            indirect,
            line: line.number,
        });
    }

    fn parse_exclude(&mut self, args: &[Token], line: &Line) {
        let Some(values) = self.strings(args, line) else {
            return;
        };
        let [path, version] = values.as_slice() else {
            self.error(line.number, "usage: exclude module/path v1.2.3");
            return;
        };
        if !self.module_path("exclude", path, line) {
            return;
        }
        let Some(version) = self.version("exclude", path, version, line) else {
            return;
        };
        if !self.path_major("exclude", path, &version, line) {
            return;
        }

        self.file.exclude.push(Exclude {
            module: ModuleRef::new(path.clone(), version),
            line: line.number,
        });
    }

    fn parse_replace(&mut self, args: &[Token], line: &Line) {
        let arrow = args.iter().position(|t| t.is_word("=>"));
        let Some(arrow @ (1 | 2)) = arrow else {
            self.error(line.number, REPLACE_USAGE);
            return;
        };
        let Some(values) = self.strings(args, line) else {
            return;
        };

        let old_path = &values[0];
        if !self.module_path("replace", old_path, line) {
            return;
        }
        let old_version = if arrow == 2 {
            match self.version("replace", old_path, &values[1], line) {
                Some(v) if self.path_major("replace", old_path, &v, line) => v,
                _ => return,
            }
        } else {
            String::new()
        };

        let new = match &values[arrow + 1..] {
            [new_path] => {
                if !is_directory_path(new_path) {
                    self.error(
                        line.number,
                        "replacement module without version must be directory path \
                         (rooted or starting with ./ or ../)",
                    );
                    return;
                }
                ModuleRef::new(new_path.clone(), "")
            }
            [new_path, new_version] => {
                if is_directory_path(new_path) {
                    self.error(
                        line.number,
                        format!("replacement module directory path {new_path:?} cannot have version"),
                    );
                    return;
                }
                if !self.module_path("replace", new_path, line) {
                    return;
                }
                match self.version("replace", new_path, new_version, line) {
                    Some(v) if self.path_major("replace", new_path, &v, line) => {
                        ModuleRef::new(new_path.clone(), v)
                    }
                    _ => return,
                }
            }
            _ => {
                self.error(line.number, REPLACE_USAGE);
                return;
            }
        };

        self.file.replace.push(Replace {
            old: ModuleRef::new(old_path.clone(), old_version),
            new,
            line: line.number,
        });
    }

    fn parse_retract(&mut self, args: &[Token], line: &Line) {
        let bounds = match args {
            [Token::LBrack, low, Token::Comma, high, Token::RBrack] => {
                low.value().zip(high.value())
            }
            [single] => single.value().map(|v| (v, v)),
            _ => None,
        };
        let Some((low, high)) = bounds else {
            self.error(line.number, "usage: retract version or retract [low, high]");
            return;
        };

        let Some(low) = self.version("retract", "", low, line) else {
            return;
        };
        let Some(high) = self.version("retract", "", high, line) else {
            return;
        };

        self.file.retract.push(Retract {
            low,
            high,
            rationale: line.comment.clone(),
            line: line.number,
        });
    }

    fn parse_path_list(&mut self, verb: &str, args: &[Token], line: &Line) {
        let Some(values) = self.strings(args, line) else {
            return;
        };
        let [path] = values.as_slice() else {
            self.error(line.number, format!("usage: {verb} path"));
            return;
        };
        if verb == "tool" {
            self.file.tool.push(path.clone());
        } else {
            self.file.ignore.push(path.clone());
        }
    }
}
