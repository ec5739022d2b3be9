use logos::Logos;
use std::ops::Range;

#[derive(Logos, Debug, PartialEq, Eq)]
#[logos(skip r"[ ,;|\r\t\n\f]+")] // Delimiters between modes
pub enum Token {
    #[regex(r"[^ ,;|\r\t\n\f]+", |lex| lex.slice().to_owned())]
    Word(String),
}

pub fn tokenize_mode_list(s: &str) -> impl Iterator<Item = (Result<Token, ()>, Range<usize>)> + '_ {
    Token::lexer(s).spanned()
}
