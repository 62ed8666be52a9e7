// File: src/model/parser.rs
//
// Quick-add interpreter: turns a single free-text line into structured
// item fields. Extraction runs in a fixed order (priority, recurrence,
// date) and each stage strips what it matched before the next stage runs,
// so the final title reflects the cumulative removals.
use crate::model::item::{Priority, RecurrenceRule};
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, Utc, Weekday};

/// Structured result of parsing one quick-add line. Never an error:
/// unrecognized input degrades to a plain title with default fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedInput {
    pub title: String,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Priority,
    pub is_recurring: bool,
    pub recurrence_rule: Option<RecurrenceRule>,
}

// Keyword tiers are fixed ordered tables, checked in sequence; the first
// tier with any textual match wins and every occurrence of that tier's
// phrases is removed. Order within a tier matters too ("low priority"
// before bare "low").
const PRIORITY_TIERS: &[(Priority, &[&str])] = &[
    (
        Priority::High,
        &["high priority", "urgent", "asap", "important"],
    ),
    (Priority::Medium, &["medium priority", "normal priority"]),
    (Priority::Low, &["low priority", "low"]),
];

const RECURRENCE_TIERS: &[(RecurrenceRule, &[&str])] = &[
    (RecurrenceRule::Daily, &["daily", "every day"]),
    (RecurrenceRule::Weekly, &["weekly", "every week"]),
    (RecurrenceRule::Monthly, &["monthly", "every month"]),
];

/// Parses a quick-add line against the current local date.
pub fn parse_quick_input(text: &str) -> ParsedInput {
    parse_quick_input_at(text, Local::now().date_naive())
}

/// Same as [`parse_quick_input`] but with an explicit reference date, so
/// relative expressions ("tomorrow", "next friday") are deterministic in
/// tests and callers that replay history.
pub fn parse_quick_input_at(text: &str, today: NaiveDate) -> ParsedInput {
    let original = text.trim();
    let mut cleaned = original.to_string();

    // 1. Priority
    let mut priority = Priority::None;
    for (level, phrases) in PRIORITY_TIERS {
        if phrases
            .iter()
            .any(|p| find_keyword(&cleaned, p).is_some())
        {
            priority = *level;
            strip_phrases(&mut cleaned, phrases);
            break;
        }
    }

    // 2. Recurrence
    let mut recurrence_rule = None;
    for (rule, phrases) in RECURRENCE_TIERS {
        if phrases
            .iter()
            .any(|p| find_keyword(&cleaned, p).is_some())
        {
            recurrence_rule = Some(*rule);
            strip_phrases(&mut cleaned, phrases);
            break;
        }
    }

    // 3. Date: only the first expression in left-to-right order counts.
    let mut due_date = None;
    if let Some(m) = recognize_first_date(&cleaned, today) {
        due_date = Some(noon_utc(m.date));
        cleaned.replace_range(m.start..m.end, "");
    }

    // 4. Collapse whitespace left behind by the removals.
    let title: String = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    // When extraction consumed every word (e.g. the input was just
    // "urgent"), the original text is kept as the title. A non-empty input
    // never yields an empty title.
    let title = if title.is_empty() {
        original.to_string()
    } else {
        title
    };

    ParsedInput {
        title,
        due_date,
        priority,
        is_recurring: recurrence_rule.is_some(),
        recurrence_rule,
    }
}

// --- KEYWORD MATCHING ---

/// Finds the first case-insensitive, word-boundary occurrence of `phrase`
/// and returns its byte span. Boundary checks keep bare "low" from
/// matching inside "below" or "allow".
fn find_keyword(haystack: &str, phrase: &str) -> Option<(usize, usize)> {
    let lower = haystack.to_ascii_lowercase();
    let mut from = 0;
    while let Some(pos) = lower[from..].find(phrase) {
        let start = from + pos;
        let end = start + phrase.len();
        let before_ok = start == 0
            || !lower[..start]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_alphanumeric());
        let after_ok = end == lower.len()
            || !lower[end..]
                .chars()
                .next()
                .is_some_and(|c| c.is_alphanumeric());
        if before_ok && after_ok {
            return Some((start, end));
        }
        from = start + 1;
    }
    None
}

/// Removes every occurrence of every phrase in the list, then trims.
fn strip_phrases(text: &mut String, phrases: &[&str]) {
    for phrase in phrases {
        while let Some((start, end)) = find_keyword(text, phrase) {
            text.replace_range(start..end, "");
        }
    }
    *text = text.trim().to_string();
}

// --- DATE RECOGNITION ---

/// A recognized date expression: the resolved calendar date plus the byte
/// span of the matched text, so the caller can strip it from the title.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateMatch {
    pub date: NaiveDate,
    pub start: usize,
    pub end: usize,
}

/// Scans the text left to right and returns the first date expression.
///
/// Understood grammar: "today", "tomorrow", weekday names (next occurrence
/// strictly after `today`), "next <weekday>", "in N days/weeks" (N numeric
/// or an English word up to twelve), "<MonthName> <day>" in the current
/// year (rolled to next year once passed), and literal "YYYY-MM-DD".
pub fn recognize_first_date(text: &str, today: NaiveDate) -> Option<DateMatch> {
    let words = split_words(text);

    for (i, &(start, _, raw)) in words.iter().enumerate() {
        let (word, end) = trim_trailing_punct(raw, start);
        let lower = word.to_ascii_lowercase();

        // "next friday" / "next tue"
        if lower == "next"
            && let Some(&(n_start, _, n_raw)) = words.get(i + 1)
        {
            let (n_word, n_end) = trim_trailing_punct(n_raw, n_start);
            if let Some(wd) = parse_weekday(&n_word.to_ascii_lowercase())
                && let Some(date) = next_weekday(today, wd)
            {
                return Some(DateMatch {
                    date,
                    start,
                    end: n_end,
                });
            }
        }

        // "in 3 days" / "in two weeks"
        if lower == "in"
            && let (Some(&(_, _, amt_raw)), Some(&(u_start, _, unit_raw))) =
                (words.get(i + 1), words.get(i + 2))
        {
            let (unit_word, u_end) = trim_trailing_punct(unit_raw, u_start);
            // An offset past the representable date range is not a date
            // expression; the words stay in the title.
            if let Some(amount) = parse_english_number(amt_raw)
                && let Some(step_days) = parse_day_unit(&unit_word.to_ascii_lowercase())
                && let Some(date) =
                    today.checked_add_signed(Duration::days(amount as i64 * step_days))
            {
                return Some(DateMatch {
                    date,
                    start,
                    end: u_end,
                });
            }
        }

        // "jan 25" / "January 25th"
        if let Some(month) = parse_month_name(&lower)
            && let Some(&(d_start, _, day_raw)) = words.get(i + 1)
        {
            let (day_word, d_end) = trim_trailing_punct(day_raw, d_start);
            if let Some(day) = parse_day_of_month(day_word)
                && let Some(date) = resolve_month_day(month, day, today)
            {
                return Some(DateMatch {
                    date,
                    start,
                    end: d_end,
                });
            }
        }

        // Single-word expressions
        let date = match lower.as_str() {
            "today" => Some(today),
            "tomorrow" => today.checked_add_signed(Duration::days(1)),
            _ => {
                if let Some(wd) = parse_weekday(&lower) {
                    next_weekday(today, wd)
                } else {
                    NaiveDate::parse_from_str(word, "%Y-%m-%d").ok()
                }
            }
        };
        if let Some(date) = date {
            return Some(DateMatch { date, start, end });
        }
    }
    None
}

/// Recognized due dates carry a noon UTC time component, mirroring the
/// original recognizer's default and keeping results independent of the
/// machine's timezone.
fn noon_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(12, 0, 0).unwrap().and_utc()
}

fn split_words(input: &str) -> Vec<(usize, usize, &str)> {
    let mut words = Vec::new();
    let mut start = None;
    for (idx, c) in input.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                words.push((s, idx, &input[s..idx]));
            }
        } else if start.is_none() {
            start = Some(idx);
        }
    }
    if let Some(s) = start {
        words.push((s, input.len(), &input[s..]));
    }
    words
}

/// Drops trailing punctuation from a word and shrinks the matched span
/// accordingly ("tomorrow," matches but the comma stays in the title).
fn trim_trailing_punct(word: &str, start: usize) -> (&str, usize) {
    let trimmed = word.trim_end_matches([',', '.', ';', ':', '!', '?']);
    (trimmed, start + trimmed.len())
}

fn parse_weekday(s: &str) -> Option<Weekday> {
    match s {
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tues" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thurs" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// The next occurrence of `target` strictly after `from` (never `from`
/// itself, even when it already falls on that weekday). `None` when the
/// occurrence would fall outside the representable date range.
fn next_weekday(from: NaiveDate, target: Weekday) -> Option<NaiveDate> {
    let mut d = from.checked_add_signed(Duration::days(1))?;
    while d.weekday() != target {
        d = d.checked_add_signed(Duration::days(1))?;
    }
    Some(d)
}

fn parse_english_number(s: &str) -> Option<u32> {
    match s.to_ascii_lowercase().as_str() {
        "one" => Some(1),
        "two" => Some(2),
        "three" => Some(3),
        "four" => Some(4),
        "five" => Some(5),
        "six" => Some(6),
        "seven" => Some(7),
        "eight" => Some(8),
        "nine" => Some(9),
        "ten" => Some(10),
        "eleven" => Some(11),
        "twelve" => Some(12),
        _ => s.parse::<u32>().ok(),
    }
}

fn parse_day_unit(s: &str) -> Option<i64> {
    match s {
        "day" | "days" => Some(1),
        "week" | "weeks" => Some(7),
        _ => None,
    }
}

fn parse_month_name(s: &str) -> Option<u32> {
    match s {
        "jan" | "january" => Some(1),
        "feb" | "february" => Some(2),
        "mar" | "march" => Some(3),
        "apr" | "april" => Some(4),
        "may" => Some(5),
        "jun" | "june" => Some(6),
        "jul" | "july" => Some(7),
        "aug" | "august" => Some(8),
        "sep" | "sept" | "september" => Some(9),
        "oct" | "october" => Some(10),
        "nov" | "november" => Some(11),
        "dec" | "december" => Some(12),
        _ => None,
    }
}

/// Accepts "25", "25th", "1st", "2nd", "3rd". Anything outside 1..=31 is
/// not a day-of-month.
fn parse_day_of_month(s: &str) -> Option<u32> {
    let digits = s
        .strip_suffix("st")
        .or_else(|| s.strip_suffix("nd"))
        .or_else(|| s.strip_suffix("rd"))
        .or_else(|| s.strip_suffix("th"))
        .unwrap_or(s);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let day = digits.parse::<u32>().ok()?;
    (1..=31).contains(&day).then_some(day)
}

/// "Jan 25" resolves in the current year, or the next year once the date
/// has passed. An invalid combination (e.g. "Feb 30") is not a match.
fn resolve_month_day(month: u32, day: u32, today: NaiveDate) -> Option<NaiveDate> {
    let this_year = NaiveDate::from_ymd_opt(today.year(), month, day)?;
    if this_year < today {
        // Feb 29 may not exist next year; keep the past date in that case.
        return Some(NaiveDate::from_ymd_opt(today.year() + 1, month, day).unwrap_or(this_year));
    }
    Some(this_year)
}
