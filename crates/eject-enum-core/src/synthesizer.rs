//! Builds the `const` object and type alias that replace an enum.

use eject_enum_parser::{EnumData, EnumMemberData, Node, NodeArena, SynthesizedData, TextSpan};

use crate::comment_carrier::{
    MemberComments, dangling_comments, declaration_comments, member_comments,
    open_brace_comments, reindent_comment,
};
use crate::error::EjectError;
use crate::evaluator::EnumValue;
use crate::number_text::number_to_string;

/// The two statements that take an enum's place in its scope.
#[derive(Clone, Debug)]
pub struct ConvertedPair {
    pub constant: SynthesizedData,
    pub alias: SynthesizedData,
}

/// Layout inputs shared by every declaration of a file.
#[derive(Clone, Copy, Debug)]
pub struct SynthesisStyle<'a> {
    pub indent_unit: &'a str,
    pub newline: &'a str,
    pub preserve_expr: bool,
}

pub fn synthesize_pair(
    arena: &NodeArena,
    text: &str,
    file_name: &str,
    decl: &EnumData,
    values: &[EnumValue],
    style: SynthesisStyle<'_>,
) -> Result<ConvertedPair, EjectError> {
    let members: Vec<&EnumMemberData> = decl
        .members
        .iter()
        .filter_map(|&member| arena.get_enum_member(member))
        .collect();

    let indent = line_indent(text, decl.start);
    let inner = format!("{indent}{}", style.indent_unit);
    let nl = style.newline;
    let export = if decl.is_exported() { "export " } else { "" };
    let name = &decl.name;

    let open_comments = open_brace_comments(text, decl);
    let dangling = dangling_comments(text, decl, members.last().copied());

    let mut body = format!("{export}const {name} = {{");
    for comment in &open_comments {
        body.push(' ');
        body.push_str(&reindent_comment(comment.get_text(text), &inner, nl));
    }

    if members.is_empty() && dangling.is_empty() && open_comments.is_empty() {
        body.push('}');
    } else {
        body.push_str(nl);
        for (member, value) in members.iter().zip(values) {
            let comments = member_comments(text, member);
            for comment in &comments.leading {
                body.push_str(&inner);
                body.push_str(&reindent_comment(comment.get_text(text), &inner, nl));
                body.push_str(nl);
            }

            let rendered = render_value(value).ok_or_else(|| EjectError::UnsupportedValue {
                file: file_name.to_string(),
                enum_name: name.clone(),
                member: member.name_text.clone(),
            })?;
            body.push_str(&inner);
            body.push_str(&property_key(member));
            body.push_str(": ");
            body.push_str(&rendered);
            body.push(',');

            let annotation = style
                .preserve_expr
                .then(|| initializer_annotation(arena, text, member))
                .flatten();
            push_member_suffix(&mut body, text, &comments, annotation, &inner, nl);
            body.push_str(nl);
        }
        for comment in &dangling {
            body.push_str(&inner);
            body.push_str(&reindent_comment(comment.get_text(text), &inner, nl));
            body.push_str(nl);
        }
        body.push_str(indent);
        body.push('}');
    }
    body.push_str(" as const;");

    // A declaration that shares a line with other code starts a new line,
    // and so does the code after it.
    let comments = declaration_comments(text, decl);
    let (carried, leading) = if begins_line(text, decl) {
        (comments.carried, String::new())
    } else {
        let carried = &text[comments.carried.pos as usize..comments.carried.end as usize];
        (TextSpan::empty_at(comments.carried.pos), format!("{nl}{carried}"))
    };
    let constant = SynthesizedData {
        pos: decl.pos,
        end: decl.end,
        detached: comments.detached,
        carried,
        leading,
        text: body,
    };
    let mut alias_text = format!("{export}type {name} = (typeof {name})[keyof typeof {name}];");
    if !ends_line(text, decl.end as usize) {
        alias_text.push_str(nl);
    }
    let alias = SynthesizedData {
        pos: decl.end,
        end: decl.end,
        detached: TextSpan::empty_at(decl.end),
        carried: TextSpan::empty_at(decl.end),
        leading: format!("{nl}{nl}{indent}"),
        text: alias_text,
    };
    Ok(ConvertedPair { constant, alias })
}

/// Trailing comments and the initializer annotation. The annotation goes
/// first when the comments end with a line comment, since nothing can follow
/// one on the same line.
fn push_member_suffix(
    out: &mut String,
    text: &str,
    comments: &MemberComments,
    annotation: Option<String>,
    inner: &str,
    nl: &str,
) {
    let annotation_first = comments.ends_with_line_comment();
    if annotation_first {
        if let Some(annotation) = &annotation {
            out.push_str(" // ");
            out.push_str(annotation);
        }
    }
    for comment in &comments.trailing {
        out.push(' ');
        out.push_str(&reindent_comment(comment.get_text(text), inner, nl));
    }
    if !annotation_first {
        if let Some(annotation) = &annotation {
            out.push_str(" // ");
            out.push_str(annotation);
        }
    }
}

/// The member's initializer on one line, when it is not a plain literal.
fn initializer_annotation(arena: &NodeArena, text: &str, member: &EnumMemberData) -> Option<String> {
    let initializer = arena.get(member.initializer)?;
    if matches!(initializer, Node::NumericLiteral(_) | Node::StringLiteral(_)) {
        return None;
    }
    let source = text.get(initializer.pos() as usize..initializer.end() as usize)?;
    Some(compact_whitespace(source))
}

/// Replace each line break and the whitespace after it with one space.
pub fn compact_whitespace(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\n' || ch == '\r' {
            while chars.next_if(|c| c.is_whitespace()).is_some() {}
            out.push(' ');
        } else {
            out.push(ch);
        }
    }
    out.trim().to_string()
}

fn property_key(member: &EnumMemberData) -> String {
    // Template literals cannot name object literal properties.
    if member.name_text.starts_with('`') {
        if let Some(key) = member.name.key() {
            return quote_string(key);
        }
    }
    member.name_text.clone()
}

fn render_value(value: &EnumValue) -> Option<String> {
    match value {
        EnumValue::Number(number) if number.is_finite() => Some(number_to_string(*number)),
        EnumValue::Number(_) => None,
        EnumValue::String(string) => Some(quote_string(string)),
    }
}

/// A double-quoted string literal for `value`.
pub fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{b}' => out.push_str("\\v"),
            '\u{c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 || c == '\u{7f}' || c == '\u{2028}' || c == '\u{2029}' => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Leading whitespace of the line containing `offset`.
/// Whether the declaration, with its leading comments, is the first thing on
/// its line.
fn begins_line(text: &str, decl: &EnumData) -> bool {
    let trivia = &text[decl.pos as usize..decl.start as usize];
    if trivia.contains(['\n', '\r']) {
        return true;
    }
    let before = &text[..decl.pos as usize];
    let line_start = before.rfind(['\n', '\r']).map_or(0, |index| index + 1);
    before[line_start..].trim().is_empty()
}

/// Whether nothing but whitespace or a comment follows `offset` on its line.
fn ends_line(text: &str, offset: usize) -> bool {
    let rest = &text[offset..];
    let line = &rest[..rest.find(['\n', '\r']).unwrap_or(rest.len())];
    let line = line.trim_start();
    line.is_empty() || line.starts_with("//") || line.starts_with("/*")
}

pub fn line_indent(text: &str, offset: u32) -> &str {
    let before = &text[..offset as usize];
    let line_start = before
        .rfind(['\n', '\r'])
        .map_or(0, |index| index + 1);
    let line = &text[line_start..];
    let width = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..width]
}
