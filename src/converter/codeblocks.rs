//! Code-block detection for extracted course material.
//!
//! PDF extraction flattens code listings into plain paragraphs. This module
//! finds runs of lines that look like source code, guesses the language, and
//! re-wraps them in fenced blocks so the resulting Markdown renders properly.
//! Existing fenced blocks pass through untouched.

use once_cell::sync::Lazy;
use regex::Regex;

struct LanguageProfile {
    name: &'static str,
    /// Strong signals, worth 10 points each.
    indicators: &'static [&'static str],
    /// Weak signals, worth 1 point each.
    keywords: &'static [&'static str],
}

static LANGUAGE_PROFILES: &[LanguageProfile] = &[
    LanguageProfile {
        name: "java",
        indicators: &["class ", "interface ", "enum ", "package ", "import java."],
        keywords: &[
            "public class",
            "private",
            "protected",
            "public static void main",
            "import java",
            "extends",
            "implements",
            "@override",
            "arraylist",
            "hashmap",
            "string[]",
            "system.out.println",
            "new arraylist",
            "new hashmap",
        ],
    },
    LanguageProfile {
        name: "python",
        indicators: &["def ", "class ", "import ", "from ", "if __name__"],
        keywords: &[
            "def ", "import ", "from ", "print(", "input(", "len(", "range(", "for ", "while ",
            "try:", "except:", "finally:", "with ", "lambda ", "yield ", "return ", "elif ",
            "pass", "break", "continue",
        ],
    },
    LanguageProfile {
        name: "cpp",
        indicators: &["#include", "using namespace", "int main(", "std::"],
        keywords: &[
            "cout <<",
            "cin >>",
            "vector<",
            "string",
            "iostream",
            "algorithm",
            "struct ",
        ],
    },
    LanguageProfile {
        name: "c",
        indicators: &["#include", "int main(", "printf(", "scanf("],
        keywords: &[
            "malloc(", "free(", "struct ", "typedef", "sizeof(", "null", "stdio.h", "stdlib.h",
        ],
    },
    LanguageProfile {
        name: "javascript",
        indicators: &["function ", "console.log", "document.", "=>"],
        keywords: &[
            "var ",
            "let ",
            "const ",
            "window.",
            "addeventlistener",
            "queryselector",
            "getelementbyid",
            "async ",
            "await ",
        ],
    },
    LanguageProfile {
        name: "sql",
        indicators: &[
            "select ",
            "from ",
            "insert ",
            "update ",
            "delete ",
            "create table",
        ],
        keywords: &[
            "where",
            "drop table",
            "alter table",
            "join",
            "inner join",
            "left join",
        ],
    },
];

static CODE_INDICATORS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\{[^}]*\}",                      // curly braces
        r"\([^)]*\)[^a-zA-Z]",             // function calls
        r"[a-zA-Z_][a-zA-Z0-9_]*\s*=\s*[^=]", // variable assignments
        r"//.*|/\*.*\*/",                  // C-style comments
        r"#.*",                            // hash comments / preprocessor
        r"(?i)public\s+class\s+\w+",
        r"(?i)def\s+\w+\s*\(",
        r"#include\s*<.*>",
        r"(?i)console\.log\s*\(",
        r"System\.out\.println\s*\(",
        r"(?i)print\s*\(",
        r"(?i)SELECT\s+.*\s+FROM",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static regex"))
    .collect()
});

/// Score a text block against each language profile and return the best
/// match, if any profile clears the detection threshold.
pub fn detect_language(block: &str) -> Option<&'static str> {
    const MIN_SCORE: u32 = 3;

    let lower = block.to_lowercase();
    let mut best: Option<(&'static str, u32)> = None;

    for profile in LANGUAGE_PROFILES {
        let mut score = 0u32;

        for indicator in profile.indicators {
            if lower.contains(indicator) {
                score += 10;
            }
        }
        for keyword in profile.keywords {
            if lower.contains(keyword) {
                score += 1;
            }
        }

        if score >= MIN_SCORE && best.map_or(true, |(_, s)| score > s) {
            best = Some((profile.name, score));
        }
    }

    best.map(|(name, _)| name)
}

/// Heuristic: does this block of text look like source code at all?
pub fn is_likely_code(block: &str) -> bool {
    let matches = CODE_INDICATORS
        .iter()
        .filter(|re| re.is_match(block))
        .count();

    let lines: Vec<&str> = block.lines().collect();
    let indented = lines
        .iter()
        .filter(|line| line.starts_with("    ") || line.starts_with('\t'))
        .count();

    matches >= 2 || (matches >= 1 && indented * 10 > lines.len() * 3)
}

/// Strip the common leading-space indent from a block and trim line endings.
fn normalize_block(lines: &[&str]) -> Vec<String> {
    let min_indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            if line.starts_with('\t') {
                0
            } else {
                line.len() - line.trim_start_matches(' ').len()
            }
        })
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| {
            let stripped = if line.len() >= min_indent {
                &line[min_indent..]
            } else {
                line
            };
            stripped.trim_end().to_string()
        })
        .collect()
}

fn is_markup_line(stripped: &str) -> bool {
    stripped.starts_with('#')
        || stripped.starts_with('*')
        || stripped.starts_with('-')
        || stripped.starts_with('>')
}

/// Wrap detected code runs in fenced blocks.
///
/// `default_lang` is the fence tag used when a run looks like code but no
/// language profile clears the threshold.
pub fn format_code_blocks(input: &str, default_lang: Option<&str>) -> String {
    let lines: Vec<&str> = input.lines().collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let stripped = line.trim();

        // Existing fences pass through verbatim
        if stripped.starts_with("```") {
            out.push(line.to_string());
            i += 1;
            while i < lines.len() {
                out.push(lines[i].to_string());
                if lines[i].trim().starts_with("```") {
                    i += 1;
                    break;
                }
                i += 1;
            }
            continue;
        }

        if !stripped.is_empty() && !is_markup_line(stripped) {
            let mut block: Vec<&str> = Vec::new();
            let mut j = i;
            let mut hit_fence = false;

            while j < lines.len() {
                let candidate = lines[j].trim();
                // Markup lines terminate a code run; they never end up fenced
                if candidate.is_empty() || is_markup_line(candidate) {
                    break;
                }
                if candidate.starts_with("```") {
                    hit_fence = true;
                    break;
                }
                block.push(lines[j]);
                j += 1;
            }

            if !hit_fence && block.len() >= 2 {
                let block_text = block.join("\n");

                if is_likely_code(&block_text) {
                    let tag = detect_language(&block_text)
                        .or(default_lang)
                        .unwrap_or("");

                    if out.last().map_or(false, |prev| !prev.trim().is_empty()) {
                        out.push(String::new());
                    }

                    out.push(format!("```{}", tag));
                    out.extend(normalize_block(&block));
                    out.push("```".to_string());
                    out.push(String::new());

                    i = j;
                    continue;
                }
            }
        }

        out.push(line.trim_end().to_string());
        i += 1;
    }

    out.join("\n")
}

/// Final cleanup applied to generated Markdown: normalised line endings,
/// trimmed trailing whitespace, exactly one trailing newline.
pub fn clean_markdown(input: &str) -> String {
    let normalized = input.replace("\r\n", "\n").replace('\r', "\n");

    let mut cleaned: String = normalized
        .lines()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n");

    while cleaned.contains("\n\n\n\n") {
        cleaned = cleaned.replace("\n\n\n\n", "\n\n\n");
    }

    let trimmed = cleaned.trim_end();
    if trimmed.is_empty() {
        String::from("\n")
    } else {
        format!("{}\n", trimmed)
    }
}
