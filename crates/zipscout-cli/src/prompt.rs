use std::io::{self, BufRead, Write};

/// Reads up to `max` postal codes, one prompt per line.
///
/// Collection stops early at the first empty line or end of input. Entries
/// are trimmed.
pub(crate) fn prompt_zip_codes<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    max: usize,
) -> io::Result<Vec<String>> {
    let mut zip_codes = Vec::new();

    for n in 1..=max {
        write!(output, "Enter ZIP code #{n} (or press Enter to finish): ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let zip_code = line.trim();
        if zip_code.is_empty() {
            break;
        }
        zip_codes.push(zip_code.to_owned());
    }

    Ok(zip_codes)
}
