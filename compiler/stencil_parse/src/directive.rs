//! Directive names.

/// The core directive set. Anything else after `#` is text.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    Set,
    Parse,
    If,
    ElseIf,
    Else,
    End,
    Foreach,
    Include,
    Evaluate,
    Macro,
    Define,
    Break,
    Stop,
}

impl DirectiveKind {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "set" => DirectiveKind::Set,
            "parse" => DirectiveKind::Parse,
            "if" => DirectiveKind::If,
            "elseif" => DirectiveKind::ElseIf,
            "else" => DirectiveKind::Else,
            "end" => DirectiveKind::End,
            "foreach" => DirectiveKind::Foreach,
            "include" => DirectiveKind::Include,
            "evaluate" => DirectiveKind::Evaluate,
            "macro" => DirectiveKind::Macro,
            "define" => DirectiveKind::Define,
            "break" => DirectiveKind::Break,
            "stop" => DirectiveKind::Stop,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            DirectiveKind::Set => "set",
            DirectiveKind::Parse => "parse",
            DirectiveKind::If => "if",
            DirectiveKind::ElseIf => "elseif",
            DirectiveKind::Else => "else",
            DirectiveKind::End => "end",
            DirectiveKind::Foreach => "foreach",
            DirectiveKind::Include => "include",
            DirectiveKind::Evaluate => "evaluate",
            DirectiveKind::Macro => "macro",
            DirectiveKind::Define => "define",
            DirectiveKind::Break => "break",
            DirectiveKind::Stop => "stop",
        }
    }

    /// Without a `(` after the name, these are plain text (`#include <stdio.h>`).
    pub fn requires_args(self) -> bool {
        !matches!(
            self,
            DirectiveKind::Else | DirectiveKind::End | DirectiveKind::Break | DirectiveKind::Stop
        )
    }

    /// Opens a body closed by `#end`.
    pub fn has_body(self) -> bool {
        matches!(
            self,
            DirectiveKind::If | DirectiveKind::Foreach | DirectiveKind::Macro | DirectiveKind::Define
        )
    }
}
