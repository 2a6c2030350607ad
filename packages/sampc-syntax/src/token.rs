/// A token handed over by the lexer.
///
/// The lexer keeps the matched text alongside the kind so that identifier
/// and constant tokens can be looked up or saved without re-scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// 1-based source line the token starts on.
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }

    /// Classify a scanned word as keyword or identifier.
    pub fn word(text: impl Into<String>, line: u32) -> Self {
        let text = text.into();
        let kind = TokenKind::from_keyword(&text).unwrap_or(TokenKind::Identifier);
        Self { kind, text, line }
    }

    pub fn identifier(text: impl Into<String>, line: u32) -> Self {
        Self::new(TokenKind::Identifier, text, line)
    }

    pub fn constant(text: impl Into<String>, line: u32) -> Self {
        Self::new(TokenKind::Constant, text, line)
    }
}

/// All token kinds of the sample C language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // --- Keywords ---
    Int,
    Void,
    If,
    Else,
    While,
    Break,
    Continue,
    Return,

    // --- Names and literals ---
    /// [A-Za-z_][A-Za-z0-9_]*
    Identifier,
    /// Integer constant, e.g. `42`, `0x1f`
    Constant,

    // --- Operators ---
    Plus,       // +
    Minus,      // -
    Star,       // *
    Slash,      // /
    Percent,    // %
    Assign,     // =
    EqEq,       // ==
    BangEq,     // !=
    Lt,         // <
    LtEq,       // <=
    Gt,         // >
    GtEq,       // >=
    Amp,        // &
    AmpAmp,     // &&
    Pipe,       // |
    PipePipe,   // ||
    Caret,      // ^
    Bang,       // !
    PlusPlus,   // ++
    MinusMinus, // --

    // --- Delimiters ---
    LParen,    // (
    RParen,    // )
    LBracket,  // [
    RBracket,  // ]
    LBrace,    // {
    RBrace,    // }
    Comma,     // ,
    Semicolon, // ;

    Eof,
}

impl TokenKind {
    /// Try to match an identifier string to a keyword.
    pub fn from_keyword(s: &str) -> Option<TokenKind> {
        match s {
            "int" => Some(TokenKind::Int),
            "void" => Some(TokenKind::Void),
            "if" => Some(TokenKind::If),
            "else" => Some(TokenKind::Else),
            "while" => Some(TokenKind::While),
            "break" => Some(TokenKind::Break),
            "continue" => Some(TokenKind::Continue),
            "return" => Some(TokenKind::Return),
            _ => None,
        }
    }

    /// Tokens the lexer routes through the symbol table.
    pub fn needs_lookup(self) -> bool {
        matches!(self, TokenKind::Identifier | TokenKind::Constant)
    }
}
