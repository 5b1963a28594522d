//! Offline element sets used when the network source cannot answer.

const ISS_CATALOG: &str = "25544";
const ISS_NAME: &str = "ISS (ZARYA)";
const ISS_LINE1: &str = "1 25544U 98067A   23286.53699478  .00015501  00000-0  28190-3 0  999";
const ISS_LINE2: &str = "2 25544  51.6416 114.7351 0004512  32.0950 119.5168 15.4988358442004";

// Columns 3-7 of both generic lines hold the catalog number.
const GENERIC_LINE1: &str = "1 #####U 20001A   23286.53699478  .00015501  00000-0  28190-3 0  999";
const GENERIC_LINE2: &str = "2 #####  51.6416 114.7351 0004512  32.0950 119.5168 15.0000000000000";

/// Whether `id` fits the 5-column catalog field of an element line.
pub fn is_eligible(id: &str) -> bool {
    (1..=5).contains(&id.len()) && id.chars().all(|c| c.is_ascii_digit())
}

/// Offline 3-line element text for `id`, or `None` when `id` cannot be
/// written into an element line.
pub fn fallback_elements(id: &str) -> Option<String> {
    if !is_eligible(id) {
        return None;
    }

    if id == ISS_CATALOG {
        return Some(format!(
            "{}\n{}\n{}",
            ISS_NAME,
            seal(ISS_LINE1),
            seal(ISS_LINE2)
        ));
    }

    let catalog = format!("{:0<5}", id);
    Some(format!(
        "Sat {}\n{}\n{}",
        id,
        seal(&GENERIC_LINE1.replace("#####", &catalog)),
        seal(&GENERIC_LINE2.replace("#####", &catalog))
    ))
}

/// Modulo-10 checksum over the first 68 columns: digits count their value,
/// minus signs count one, everything else counts zero.
pub fn checksum(line: &str) -> u32 {
    line.chars()
        .take(68)
        .map(|c| match c {
            '-' => 1,
            c => c.to_digit(10).unwrap_or(0),
        })
        .sum::<u32>()
        % 10
}

/// Appends the checksum digit to a 68-column element line.
pub fn seal(line: &str) -> String {
    format!("{}{}", line, checksum(line))
}
