//! Reverses the backslash doubling applied to LaTeX stored in note HTML.
//!
//! The editor stores equation source with every backslash doubled
//! (`\phi` becomes `\\phi`). Four backslashes in a row are a LaTeX line
//! break (`\\`) and must survive untouched.

use std::sync::LazyLock;

use regex::Regex;

/// `\\` followed by a command name, e.g. `\\phi`.
static COMMAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\\\([a-zA-Z]+)").expect("valid command pattern"));

/// `\\` followed by a grouping character, e.g. `\\{`.
static GROUPING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\\\([{}\[\]()])").expect("valid grouping pattern"));

/// `\\` followed by any other symbol, excluding a further backslash and
/// whitespace. An escaped space (`\\ `) is a LaTeX command of its own and
/// stays doubled.
static SYMBOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\\\([^\\\s])").expect("valid symbol pattern"));

/// Undoes backslash doubling in LaTeX source.
///
/// The passes run in a fixed order; later passes only see what earlier ones
/// left behind. Escaped spaces and line breaks pass through untouched.
///
/// # Examples
///
/// ```
/// use zendown::infra::unescape;
///
/// assert_eq!(unescape(r"\\phi"), r"\phi");
/// assert_eq!(unescape(r"\\{x\\}"), r"\{x\}");
/// assert_eq!(unescape(r"a \\ b"), r"a \\ b");
/// assert_eq!(unescape(r"x\\\\ y"), r"x\\\\ y");
/// ```
pub fn unescape(content: &str) -> String {
    let content = COMMAND.replace_all(content, r"\${1}");
    let content = GROUPING.replace_all(&content, r"\${1}");
    let content = SYMBOL.replace_all(&content, r"\${1}");
    content.into_owned()
}
