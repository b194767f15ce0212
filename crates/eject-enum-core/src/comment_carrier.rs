//! Comments that travel with a converted enum.
//!
//! Comments are trivia, so they are located by offset: the documentation
//! block above the declaration, comments before and after each member, after
//! the opening brace and before the closing one.

use eject_enum_common::CommentRange;
use eject_enum_common::comments::{
    get_comment_ranges_between, get_leading_comment_ranges, get_trailing_comment_ranges,
    is_jsdoc_comment,
};
use eject_enum_parser::{EnumData, EnumMemberData, TextSpan};

/// Where the declaration's leading trivia goes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeclarationComments {
    /// Trivia above the documentation comment. It stays where it is.
    pub detached: TextSpan,
    /// From the documentation comment up to the declaration. It moves with
    /// the constant.
    pub carried: TextSpan,
}

pub fn declaration_comments(text: &str, decl: &EnumData) -> DeclarationComments {
    let doc_start = get_leading_comment_ranges(text, decl.pos as usize)
        .into_iter()
        .find(|comment| comment.end <= decl.start && is_jsdoc_comment(comment, text))
        .map_or(decl.start, |comment| comment.pos);
    DeclarationComments {
        detached: TextSpan::new(decl.pos, doc_start),
        carried: TextSpan::new(doc_start, decl.start),
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemberComments {
    /// Comments on the lines above the member.
    pub leading: Vec<CommentRange>,
    /// Comments after the member or its comma on the same line.
    pub trailing: Vec<CommentRange>,
}

impl MemberComments {
    /// Whether the last trailing comment runs to the end of the line.
    pub fn ends_with_line_comment(&self) -> bool {
        self.trailing.last().is_some_and(|comment| !comment.is_multi_line)
    }
}

pub fn member_comments(text: &str, member: &EnumMemberData) -> MemberComments {
    let leading = get_leading_comment_ranges(text, member.pos as usize)
        .into_iter()
        .filter(|comment| comment.end <= member.start)
        .collect();
    let trailing = match member.separator_end {
        Some(separator_end) => {
            let mut trailing =
                get_comment_ranges_between(text, member.end as usize, separator_end as usize - 1);
            trailing.extend(get_trailing_comment_ranges(text, separator_end as usize));
            trailing
        }
        None => get_trailing_comment_ranges(text, member.end as usize),
    };
    MemberComments { leading, trailing }
}

/// Comments on the same line as the opening brace.
pub fn open_brace_comments(text: &str, decl: &EnumData) -> Vec<CommentRange> {
    get_trailing_comment_ranges(text, decl.open_brace_end as usize)
        .into_iter()
        .filter(|comment| comment.end <= decl.close_brace_start)
        .collect()
}

/// Comments on their own lines between the last member and the closing
/// brace. `last_member` is `None` for an empty body.
pub fn dangling_comments(
    text: &str,
    decl: &EnumData,
    last_member: Option<&EnumMemberData>,
) -> Vec<CommentRange> {
    let after = match last_member {
        Some(member) => member.separator_end.unwrap_or(member.end),
        None => decl.open_brace_end,
    };
    get_leading_comment_ranges(text, after as usize)
        .into_iter()
        .filter(|comment| comment.end <= decl.close_brace_start)
        .collect()
}

/// Comment text with every line after the first re-indented to `indent`
/// plus one space, which keeps ` * ` columns of block comments aligned.
pub fn reindent_comment(comment: &str, indent: &str, newline: &str) -> String {
    let mut lines = comment.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line));
    let mut out = lines.next().unwrap_or_default().to_string();
    for line in lines {
        out.push_str(newline);
        let line = line.trim_start();
        if !line.is_empty() {
            out.push_str(indent);
            out.push(' ');
            out.push_str(line);
        }
    }
    out
}
