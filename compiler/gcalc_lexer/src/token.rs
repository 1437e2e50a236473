use std::fmt;

/// Lexeme of the multiplication operator as it appears on the keypad.
pub const TIMES: &str = "×";
/// Lexeme of the division operator as it appears on the keypad.
pub const DIVIDE: &str = "÷";
/// Reserved numeric constant: Euler's number.
pub const EULER: &str = "e";
/// Reserved numeric constant: pi.
pub const PI: &str = "π";
/// Lexeme of the square root function.
pub const SQRT: &str = "√";
/// Lexeme of the free variable.
pub const VARIABLE: &str = "X";

/// The lexical category of a token.
///
/// This set is closed: the parser matches on it exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A digit, a decimal point, a merged numeric literal, or one of the
    /// reserved constants `e` and `π`.
    Number,
    /// One of `+ - × ÷ ^`.
    Operator,
    /// One of `sin cos tan log ln √`.
    Function,
    /// `(` or `)`.
    Parenthesis,
    /// The free variable `X`.
    Variable,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Number => "number",
            TokenKind::Operator => "operator",
            TokenKind::Function => "function",
            TokenKind::Parenthesis => "parenthesis",
            TokenKind::Variable => "variable",
        };
        f.write_str(name)
    }
}

/// A single lexical unit of a calculator expression.
///
/// Tokens are immutable once built. They never carry tree structure; the
/// parser produces a separate AST from them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    kind: TokenKind,
    text: String,
}

impl Token {
    /// Create a token of the given kind with the given lexeme
    pub fn new<S: Into<String>>(kind: TokenKind, text: S) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// A numeric token: a digit, a decimal point, a multi-digit literal, `e` or `π`
    pub fn number<S: Into<String>>(text: S) -> Self {
        Self::new(TokenKind::Number, text)
    }

    /// An operator token
    pub fn operator<S: Into<String>>(text: S) -> Self {
        Self::new(TokenKind::Operator, text)
    }

    /// A function name token
    pub fn function<S: Into<String>>(text: S) -> Self {
        Self::new(TokenKind::Function, text)
    }

    /// The opening parenthesis
    pub fn open_paren() -> Self {
        Self::new(TokenKind::Parenthesis, "(")
    }

    /// The closing parenthesis
    pub fn close_paren() -> Self {
        Self::new(TokenKind::Parenthesis, ")")
    }

    /// The free variable
    pub fn variable() -> Self {
        Self::new(TokenKind::Variable, VARIABLE)
    }

    /// The lexical category of this token
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// The literal lexeme
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether this is one of the reserved constants `e` or `π`.
    pub fn is_reserved_constant(&self) -> bool {
        self.kind == TokenKind::Number && (self.text == EULER || self.text == PI)
    }

    /// Whether this is a numeric token that takes part in digit concatenation.
    pub fn is_numeric_literal(&self) -> bool {
        self.kind == TokenKind::Number && !self.is_reserved_constant()
    }

    /// Whether this token is the parenthesis `paren` (either `(` or `)`).
    pub fn is_paren(&self, paren: char) -> bool {
        let mut buf = [0u8; 4];
        self.kind == TokenKind::Parenthesis && self.text == *paren.encode_utf8(&mut buf)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Render a token sequence the way the calculator display shows it.
pub fn display_text(tokens: &[Token]) -> String {
    tokens.iter().map(Token::text).collect()
}
