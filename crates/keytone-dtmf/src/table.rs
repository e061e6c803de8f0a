use std::collections::HashMap;
use std::sync::OnceLock;

use keytone_goertzel::FrequencyRange;
use phf::phf_ordered_map;

/// Telephone keypad as `(high_hz, low_hz)`, in keypad reading order.
static KEYPAD: phf::OrderedMap<char, (u32, u32)> = phf_ordered_map! {
    '1' => (1209, 697),
    '2' => (1336, 697),
    '3' => (1477, 697),
    '4' => (1209, 770),
    '5' => (1336, 770),
    '6' => (1477, 770),
    '7' => (1209, 852),
    '8' => (1336, 852),
    '9' => (1477, 852),
    '*' => (1209, 941),
    '0' => (1336, 941),
    '#' => (1477, 941),
};

/// Fourth column of the 16-key DTMF plan.
static EXTENDED_COLUMN: phf::OrderedMap<char, (u32, u32)> = phf_ordered_map! {
    'A' => (1633, 697),
    'B' => (1633, 770),
    'C' => (1633, 852),
    'D' => (1633, 941),
};

static STANDARD: OnceLock<ToneTable> = OnceLock::new();
static EXTENDED: OnceLock<ToneTable> = OnceLock::new();

/// One high-group/low-group frequency pair in whole Hz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TonePair {
    pub high_hz: u32,
    pub low_hz: u32,
}

impl TonePair {
    pub const fn new(high_hz: u32, low_hz: u32) -> Self {
        Self { high_hz, low_hz }
    }
}

impl std::fmt::Display for TonePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Hz + {} Hz", self.low_hz, self.high_hz)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("symbol {0:?} appears more than once")]
    DuplicateSymbol(char),
    #[error("{pair} is assigned to both {first:?} and {second:?}")]
    DuplicatePair {
        pair: TonePair,
        first: char,
        second: char,
    },
}

/// Ordered symbol table with a reverse index from tone pair to symbol.
#[derive(Debug, Clone)]
pub struct ToneTable {
    entries: Vec<(char, TonePair)>,
    by_pair: HashMap<TonePair, char>,
}

impl ToneTable {
    /// Build a table from `(symbol, pair)` entries, keeping their order.
    ///
    /// Symbols and pairs must both be unique so that lookups in either
    /// direction are unambiguous.
    pub fn new<I>(entries: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = (char, TonePair)>,
    {
        let entries: Vec<(char, TonePair)> = entries.into_iter().collect();
        for (i, &(symbol, pair)) in entries.iter().enumerate() {
            for &(other_symbol, other_pair) in &entries[..i] {
                if other_symbol == symbol {
                    return Err(TableError::DuplicateSymbol(symbol));
                }
                if other_pair == pair {
                    return Err(TableError::DuplicatePair {
                        pair,
                        first: other_symbol,
                        second: symbol,
                    });
                }
            }
        }
        Ok(Self::from_unique(entries))
    }

    fn from_unique(entries: Vec<(char, TonePair)>) -> Self {
        let by_pair = entries.iter().map(|&(symbol, pair)| (pair, symbol)).collect();
        Self { entries, by_pair }
    }

    /// The 12-key telephone keypad: `1`-`9`, `*`, `0`, `#`.
    pub fn standard() -> &'static ToneTable {
        STANDARD.get_or_init(|| Self::from_unique(phf_entries(&KEYPAD).collect()))
    }

    /// The 16-key DTMF plan: the keypad plus `A`-`D`.
    pub fn extended() -> &'static ToneTable {
        EXTENDED.get_or_init(|| {
            Self::from_unique(
                phf_entries(&KEYPAD)
                    .chain(phf_entries(&EXTENDED_COLUMN))
                    .collect(),
            )
        })
    }

    /// Symbol whose nominal tones are exactly `pair`.
    pub fn symbol(&self, pair: TonePair) -> Option<char> {
        self.by_pair.get(&pair).copied()
    }

    /// Nominal tones for `symbol`.
    pub fn tones(&self, symbol: char) -> Option<TonePair> {
        self.entries
            .iter()
            .find(|(s, _)| *s == symbol)
            .map(|&(_, pair)| pair)
    }

    /// Entries as `(symbol, tones)` in table order.
    ///
    /// ```
    /// use keytone_dtmf::ToneTable;
    ///
    /// let table = ToneTable::standard();
    /// let symbols: String = table.iter().map(|(symbol, _)| symbol).collect();
    /// assert_eq!(symbols, "123456789*0#");
    /// assert_eq!(table.len(), 12);
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = (char, TonePair)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of symbols in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One estimator range per entry, from its low tone to its high tone,
    /// widened by `margin_hz` on both sides.
    pub fn search_ranges(&self, margin_hz: u32) -> Vec<FrequencyRange> {
        let margin = f64::from(margin_hz);
        self.entries
            .iter()
            .map(|(_, pair)| {
                FrequencyRange::new(
                    f64::from(pair.low_hz) - margin,
                    f64::from(pair.high_hz) + margin,
                )
            })
            .collect()
    }
}

fn phf_entries(
    map: &'static phf::OrderedMap<char, (u32, u32)>,
) -> impl Iterator<Item = (char, TonePair)> {
    map.entries()
        .map(|(&symbol, &(high_hz, low_hz))| (symbol, TonePair::new(high_hz, low_hz)))
}
