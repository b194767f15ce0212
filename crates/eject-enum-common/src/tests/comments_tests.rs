use crate::comments::{
    get_comment_ranges_between, get_leading_comment_ranges, get_trailing_comment_ranges,
    is_jsdoc_comment, skip_trivia,
};

fn texts<'a>(source: &'a str, ranges: &[crate::CommentRange]) -> Vec<&'a str> {
    ranges.iter().map(|c| c.get_text(source)).collect()
}

#[test]
fn leading_comments_skip_same_line_comment_of_previous_token() {
    let source = "a; // trailing\n/* one */\n// two\nb;";
    let leading = get_leading_comment_ranges(source, 2);
    assert_eq!(texts(source, &leading), vec!["/* one */", "// two"]);
}

#[test]
fn leading_comments_at_file_start_include_first_line() {
    let source = "// header\nenum A {}";
    let leading = get_leading_comment_ranges(source, 0);
    assert_eq!(texts(source, &leading), vec!["// header"]);
    assert!(leading[0].has_trailing_new_line);
}

#[test]
fn leading_comments_skip_shebang() {
    let source = "#!/usr/bin/env node\n// real\nx;";
    let leading = get_leading_comment_ranges(source, 0);
    assert_eq!(texts(source, &leading), vec!["// real"]);
}

#[test]
fn trailing_comments_stop_at_line_break() {
    let source = "A, /* a */ // b\n// c\nB";
    let trailing = get_trailing_comment_ranges(source, 2);
    assert_eq!(texts(source, &trailing), vec!["/* a */", "// b"]);
    assert!(trailing[1].has_trailing_new_line);
}

#[test]
fn trailing_comments_include_multi_line_block() {
    let source = "A, /* long\n   text */\nB";
    let trailing = get_trailing_comment_ranges(source, 2);
    assert_eq!(trailing.len(), 1);
    assert!(trailing[0].spans_lines(source));
}

#[test]
fn comments_between_ignore_line_structure() {
    let source = "x // a\n\n  /* b */ // c\n y";
    let end = source.rfind('y').unwrap_or(source.len());
    let all = get_comment_ranges_between(source, 1, end);
    assert_eq!(texts(source, &all), vec!["// a", "/* b */", "// c"]);
    assert!(all[0].has_trailing_new_line);
    assert!(!all[1].has_trailing_new_line);
}

#[test]
fn jsdoc_detection_matches_doc_shape_only() {
    let source = "/** doc */ /*** banner */ /**/ /* plain */";
    let all = get_comment_ranges_between(source, 0, source.len());
    let flags: Vec<bool> = all.iter().map(|c| is_jsdoc_comment(c, source)).collect();
    assert_eq!(flags, vec![true, false, false, false]);
}

#[test]
fn skip_trivia_passes_comments_and_whitespace() {
    let source = "  /* a */\n // b\n  token";
    assert_eq!(&source[skip_trivia(source, 0)..], "token");
}
