//! Gematria: numeric letter values and Hebrew numerals.

/// Numeric value of a Hebrew letter. Final forms carry their base letter's
/// value; every other character is worth 0.
pub fn letter_value(letter: char) -> u32 {
    match letter {
        'א' => 1,
        'ב' => 2,
        'ג' => 3,
        'ד' => 4,
        'ה' => 5,
        'ו' => 6,
        'ז' => 7,
        'ח' => 8,
        'ט' => 9,
        'י' => 10,
        'כ' | 'ך' => 20,
        'ל' => 30,
        'מ' | 'ם' => 40,
        'נ' | 'ן' => 50,
        'ס' => 60,
        'ע' => 70,
        'פ' | 'ף' => 80,
        'צ' | 'ץ' => 90,
        'ק' => 100,
        'ר' => 200,
        'ש' => 300,
        'ת' => 400,
        _ => 0,
    }
}

/// Sum of the letter values of `text`.
///
/// ```
/// use mafteah::lexicon::gematria::calculate_gematria;
///
/// assert_eq!(calculate_gematria("אחד"), 13);
/// assert_eq!(calculate_gematria("אהבה"), 13);
/// ```
pub fn calculate_gematria(text: &str) -> u32 {
    text.chars().map(letter_value).sum()
}

const HUNDREDS: [&str; 10] = ["", "ק", "ר", "ש", "ת", "תק", "תר", "תש", "תת", "תתק"];
const TENS: [&str; 10] = ["", "י", "כ", "ל", "מ", "נ", "ס", "ע", "פ", "צ"];
const UNITS: [&str; 10] = ["", "א", "ב", "ג", "ד", "ה", "ו", "ז", "ח", "ט"];

/// Largest number written as a Hebrew numeral.
pub const MAX_HEBREW_NUMERAL: i64 = 999;

/// Write `number` as a Hebrew numeral (1..=999).
///
/// 15 and 16 are written טו and טז rather than spelling a divine name. Values
/// outside the range come back as plain decimal strings.
///
/// ```
/// use mafteah::lexicon::gematria::convert_number_to_hebrew;
///
/// assert_eq!(convert_number_to_hebrew(123), "קכג");
/// assert_eq!(convert_number_to_hebrew(1000), "1000");
/// ```
pub fn convert_number_to_hebrew(number: i64) -> String {
    if !(1..=MAX_HEBREW_NUMERAL).contains(&number) {
        return number.to_string();
    }

    let n = number as usize;
    let mut numeral = String::from(HUNDREDS[n / 100]);
    match n % 100 {
        15 => numeral.push_str("טו"),
        16 => numeral.push_str("טז"),
        rest => {
            numeral.push_str(TENS[rest / 10]);
            numeral.push_str(UNITS[rest % 10]);
        }
    }
    numeral
}
