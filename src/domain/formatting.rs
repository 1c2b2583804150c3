/// Short English label for a calendar month (1-12). Out-of-range values yield "?".
pub fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "?",
    }
}

/// Format a page count for display.
pub fn format_pages(pages: i64) -> String {
    if pages == 1 {
        "1 page".to_string()
    } else {
        format!("{pages} pages")
    }
}

/// Signed percentage with no decimals, e.g. "+25%", "-10%", "0%".
pub fn format_percentage_change(value: f64) -> String {
    let rounded = value.round();
    if rounded > 0.0 {
        format!("+{rounded}%")
    } else if rounded < 0.0 {
        format!("{rounded}%")
    } else {
        "0%".to_string()
    }
}

/// Format a 1-5 star rating, e.g. "★★★☆☆".
pub fn format_rating(rating: i32) -> String {
    let filled = rating.clamp(0, 5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Em dash placeholder for absent values.
pub const EM_DASH: &str = "\u{2014}";
