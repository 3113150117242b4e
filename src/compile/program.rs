use crate::{
    compile::parse::token::{Path, Section, Token},
    syntax::Syntax,
};

/// A single step executed by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Write literal text.
    Text(String),
    /// A new line begins, apply the current partial indentation to it.
    Indent,
    /// Write the value of a path.
    Variable { path: Path, escape: bool },
    /// Execute the [`Scope`] at `body` once for every item of the value.
    Section {
        path: Path,
        body: usize,
        /// Unprocessed text given to lambdas.
        raw: String,
        /// Delimiters used to compile lambda results.
        syntax: Syntax,
    },
    /// Execute the [`Scope`] at `body` when the value is falsy.
    Inverted { path: Path, body: usize },
    /// Render a template by name, indenting every line.
    Partial { name: String, indent: String },
}

/// A sequence of instructions.
///
/// Each section is compiled into its own `Scope`, which is referenced by
/// index from the [`Instruction`] that executes it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scope {
    pub instructions: Vec<Instruction>,
}

impl Scope {
    /// Create a new, empty [`Scope`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an instruction.
    ///
    /// Adjacent text is merged into a single instruction, and repeated
    /// indentation markers are collapsed.
    pub fn push(&mut self, instruction: Instruction) {
        match (self.instructions.last_mut(), instruction) {
            (_, Instruction::Text(text)) if text.is_empty() => {}
            (Some(Instruction::Text(previous)), Instruction::Text(text)) => {
                previous.push_str(&text)
            }
            (Some(Instruction::Indent), Instruction::Indent) => {}
            (_, instruction) => self.instructions.push(instruction),
        }
    }
}

/// Turns a token tree into a flat list of [`Scope`] instances.
#[derive(Debug, Default)]
pub struct Compiler {
    scopes: Vec<Scope>,
}

impl Compiler {
    /// Create a new [`Compiler`].
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile the tokens.
    ///
    /// The first `Scope` in the returned list is the entry point.
    pub fn compile(mut self, tokens: Vec<Token>) -> Vec<Scope> {
        self.compile_scope(tokens);

        self.scopes
    }

    /// Compile the tokens into a new [`Scope`], and return its index.
    ///
    /// The index is reserved before nested sections are compiled, so a
    /// parent always comes before its children.
    fn compile_scope(&mut self, tokens: Vec<Token>) -> usize {
        let index = self.scopes.len();
        self.scopes.push(Scope::new());

        let mut scope = Scope::new();
        for token in tokens {
            let instruction = match token {
                Token::Text(text) => Instruction::Text(text),
                Token::LineStart => Instruction::Indent,
                Token::Variable { path, escape } => Instruction::Variable { path, escape },
                Token::Section(section) => self.compile_section(section),
                Token::Partial { name, indent } => Instruction::Partial { name, indent },
            };
            scope.push(instruction);
        }
        self.scopes[index] = scope;

        index
    }

    fn compile_section(&mut self, section: Section) -> Instruction {
        let Section {
            path,
            invert,
            body,
            raw,
            syntax,
            ..
        } = section;
        let body = self.compile_scope(body);

        if invert {
            Instruction::Inverted { path, body }
        } else {
            Instruction::Section {
                path,
                body,
                raw,
                syntax,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Compiler, Instruction, Scope};
    use crate::compile::{Parser, Path};
    use crate::syntax::Syntax;
    use pretty_assertions::assert_eq;

    fn compile(text: &str) -> Vec<Scope> {
        let tokens = Parser::new(text, &Syntax::default())
            .unwrap()
            .parse()
            .unwrap();
        Compiler::new().compile(tokens)
    }

    #[test]
    fn test_scope_folding() {
        let mut scope = Scope::new();
        scope.push(Instruction::Indent);
        scope.push(Instruction::Indent);
        scope.push(Instruction::Text("a".into()));
        scope.push(Instruction::Text(String::new()));
        scope.push(Instruction::Text("b".into()));

        assert_eq!(
            scope.instructions,
            vec![Instruction::Indent, Instruction::Text("ab".into())]
        );
    }

    #[test]
    fn test_compile_sections() {
        let scopes = compile("{{#a}}x{{^b}}y{{/b}}{{/a}}z");

        assert_eq!(scopes.len(), 3);
        assert_eq!(
            scopes[0].instructions,
            vec![
                Instruction::Indent,
                Instruction::Section {
                    path: Path::parse("a"),
                    body: 1,
                    raw: "x{{^b}}y{{/b}}".into(),
                    syntax: Syntax::default(),
                },
                Instruction::Text("z".into()),
            ]
        );
        assert_eq!(
            scopes[1].instructions,
            vec![
                Instruction::Text("x".into()),
                Instruction::Inverted {
                    path: Path::parse("b"),
                    body: 2,
                },
            ]
        );
        assert_eq!(scopes[2].instructions, vec![Instruction::Text("y".into())]);
    }

    #[test]
    fn test_compile_removes_comments() {
        let scopes = compile("a{{! one }}b{{! two }}c");

        assert_eq!(
            scopes[0].instructions,
            vec![Instruction::Indent, Instruction::Text("abc".into())]
        );
    }
}
