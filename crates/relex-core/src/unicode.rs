// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Character-property name classification.
//!
//! `\p{…}` bodies are classified here into structured [`PropertyKind`]
//! values. Matching follows UAX44-LM3 loose matching: case-insensitive,
//! with underscores, hyphens, and whitespace ignored and an optional
//! leading `is` stripped.
//!
//! Classification is purely name-level. No codepoint database is consulted;
//! downstream layers own the actual character sets. Names this module does
//! not recognize are preserved verbatim as [`PropertyKind::Other`] so the
//! AST round-trips across classifier databases.

use ecow::EcoString;

/// A classified character-property predicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    /// `\p{any}` — every scalar.
    Any,
    /// `\p{assigned}` — every assigned scalar.
    Assigned,
    /// A general category, e.g. `\p{Lu}` or `\p{gc=Letter}`.
    GeneralCategory(GeneralCategory),
    /// A script, e.g. `\p{Greek}` or `\p{sc=Latin}`. Carries the canonical
    /// script name.
    Script(EcoString),
    /// A script-extension query, `\p{scx=…}`.
    ScriptExtension(EcoString),
    /// A block query, `\p{blk=…}`. The value is kept verbatim.
    Block(EcoString),
    /// An age query, `\p{age=…}`. The value is kept verbatim.
    Age(EcoString),
    /// A binary property, e.g. `\p{Alphabetic}`. Carries the canonical
    /// property name.
    Binary(EcoString),
    /// A POSIX class name, e.g. `\p{alpha}` or `[:alpha:]`.
    Posix(PosixClass),
    /// An unrecognized key/value pair, preserved for round-trip.
    Other {
        /// The key, when the `key=value` form was used.
        key: Option<EcoString>,
        /// The value text as written.
        value: EcoString,
    },
}

/// A POSIX character class, `[:name:]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum PosixClass {
    Alnum,
    Alpha,
    Ascii,
    Blank,
    Cntrl,
    Digit,
    Graph,
    Lower,
    Print,
    Punct,
    Space,
    Upper,
    Word,
    Xdigit,
}

impl PosixClass {
    /// Looks up a POSIX class by loosely-matched name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = normalize(name);
        Some(match name.as_str() {
            "alnum" => Self::Alnum,
            "alpha" => Self::Alpha,
            "ascii" => Self::Ascii,
            "blank" => Self::Blank,
            "cntrl" => Self::Cntrl,
            "digit" => Self::Digit,
            "graph" => Self::Graph,
            "lower" => Self::Lower,
            "print" => Self::Print,
            "punct" => Self::Punct,
            "space" => Self::Space,
            "upper" => Self::Upper,
            "word" => Self::Word,
            "xdigit" => Self::Xdigit,
            _ => return None,
        })
    }

    /// The canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Alnum => "alnum",
            Self::Alpha => "alpha",
            Self::Ascii => "ascii",
            Self::Blank => "blank",
            Self::Cntrl => "cntrl",
            Self::Digit => "digit",
            Self::Graph => "graph",
            Self::Lower => "lower",
            Self::Print => "print",
            Self::Punct => "punct",
            Self::Space => "space",
            Self::Upper => "upper",
            Self::Word => "word",
            Self::Xdigit => "xdigit",
        }
    }
}

/// A Unicode general category, including the grouped meta-categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum GeneralCategory {
    Letter,
    CasedLetter,
    UppercaseLetter,
    LowercaseLetter,
    TitlecaseLetter,
    ModifierLetter,
    OtherLetter,
    Mark,
    NonspacingMark,
    SpacingMark,
    EnclosingMark,
    Number,
    DecimalNumber,
    LetterNumber,
    OtherNumber,
    Punctuation,
    ConnectorPunctuation,
    DashPunctuation,
    OpenPunctuation,
    ClosePunctuation,
    InitialPunctuation,
    FinalPunctuation,
    OtherPunctuation,
    Symbol,
    MathSymbol,
    CurrencySymbol,
    ModifierSymbol,
    OtherSymbol,
    Separator,
    SpaceSeparator,
    LineSeparator,
    ParagraphSeparator,
    Other,
    Control,
    Format,
    Surrogate,
    PrivateUse,
    Unassigned,
}

impl GeneralCategory {
    /// Looks up a general category by loosely-matched short or long name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = normalize(name);
        Some(match name.as_str() {
            "l" | "letter" => Self::Letter,
            "lc" | "casedletter" => Self::CasedLetter,
            "lu" | "uppercaseletter" => Self::UppercaseLetter,
            "ll" | "lowercaseletter" => Self::LowercaseLetter,
            "lt" | "titlecaseletter" => Self::TitlecaseLetter,
            "lm" | "modifierletter" => Self::ModifierLetter,
            "lo" | "otherletter" => Self::OtherLetter,
            "m" | "mark" | "combiningmark" => Self::Mark,
            "mn" | "nonspacingmark" => Self::NonspacingMark,
            "mc" | "spacingmark" => Self::SpacingMark,
            "me" | "enclosingmark" => Self::EnclosingMark,
            "n" | "number" => Self::Number,
            "nd" | "decimalnumber" | "digit" => Self::DecimalNumber,
            "nl" | "letternumber" => Self::LetterNumber,
            "no" | "othernumber" => Self::OtherNumber,
            "p" | "punctuation" | "punct" => Self::Punctuation,
            "pc" | "connectorpunctuation" => Self::ConnectorPunctuation,
            "pd" | "dashpunctuation" => Self::DashPunctuation,
            "ps" | "openpunctuation" => Self::OpenPunctuation,
            "pe" | "closepunctuation" => Self::ClosePunctuation,
            "pi" | "initialpunctuation" => Self::InitialPunctuation,
            "pf" | "finalpunctuation" => Self::FinalPunctuation,
            "po" | "otherpunctuation" => Self::OtherPunctuation,
            "s" | "symbol" => Self::Symbol,
            "sm" | "mathsymbol" => Self::MathSymbol,
            "sc" | "currencysymbol" => Self::CurrencySymbol,
            "sk" | "modifiersymbol" => Self::ModifierSymbol,
            "so" | "othersymbol" => Self::OtherSymbol,
            "z" | "separator" => Self::Separator,
            "zs" | "spaceseparator" => Self::SpaceSeparator,
            "zl" | "lineseparator" => Self::LineSeparator,
            "zp" | "paragraphseparator" => Self::ParagraphSeparator,
            "c" | "other" => Self::Other,
            "cc" | "control" | "cntrl" => Self::Control,
            "cf" | "format" => Self::Format,
            "cs" | "surrogate" => Self::Surrogate,
            "co" | "privateuse" => Self::PrivateUse,
            "cn" | "unassigned" => Self::Unassigned,
            _ => return None,
        })
    }

    /// The two-letter abbreviation (one letter for meta-categories).
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Self::Letter => "L",
            Self::CasedLetter => "LC",
            Self::UppercaseLetter => "Lu",
            Self::LowercaseLetter => "Ll",
            Self::TitlecaseLetter => "Lt",
            Self::ModifierLetter => "Lm",
            Self::OtherLetter => "Lo",
            Self::Mark => "M",
            Self::NonspacingMark => "Mn",
            Self::SpacingMark => "Mc",
            Self::EnclosingMark => "Me",
            Self::Number => "N",
            Self::DecimalNumber => "Nd",
            Self::LetterNumber => "Nl",
            Self::OtherNumber => "No",
            Self::Punctuation => "P",
            Self::ConnectorPunctuation => "Pc",
            Self::DashPunctuation => "Pd",
            Self::OpenPunctuation => "Ps",
            Self::ClosePunctuation => "Pe",
            Self::InitialPunctuation => "Pi",
            Self::FinalPunctuation => "Pf",
            Self::OtherPunctuation => "Po",
            Self::Symbol => "S",
            Self::MathSymbol => "Sm",
            Self::CurrencySymbol => "Sc",
            Self::ModifierSymbol => "Sk",
            Self::OtherSymbol => "So",
            Self::Separator => "Z",
            Self::SpaceSeparator => "Zs",
            Self::LineSeparator => "Zl",
            Self::ParagraphSeparator => "Zp",
            Self::Other => "C",
            Self::Control => "Cc",
            Self::Format => "Cf",
            Self::Surrogate => "Cs",
            Self::PrivateUse => "Co",
            Self::Unassigned => "Cn",
        }
    }
}

/// Applies UAX44-LM3 loose matching: lowercase; strip `_`, `-`, and
/// whitespace; strip one leading `is`.
#[must_use]
pub fn normalize(name: &str) -> String {
    let mut normalized: String = name
        .chars()
        .filter(|c| !matches!(c, '_' | '-') && !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if normalized.len() > 2 && normalized.starts_with("is") {
        normalized.drain(..2);
    }
    normalized
}

/// Classifies a `key=value` property body.
///
/// Unknown keys, and unknown values under a known key, are preserved as
/// [`PropertyKind::Other`].
#[must_use]
pub fn classify_property(key: &str, value: &str) -> PropertyKind {
    let other = || PropertyKind::Other {
        key: Some(key.into()),
        value: value.into(),
    };
    match normalize(key).as_str() {
        "gc" | "generalcategory" => {
            GeneralCategory::from_name(value).map_or_else(other, PropertyKind::GeneralCategory)
        }
        "sc" | "script" => {
            canonical_script(value).map_or_else(other, |s| PropertyKind::Script(s.into()))
        }
        "scx" | "scriptextensions" => {
            canonical_script(value).map_or_else(other, |s| PropertyKind::ScriptExtension(s.into()))
        }
        "blk" | "block" => PropertyKind::Block(value.into()),
        "age" => PropertyKind::Age(value.into()),
        _ => other(),
    }
}

/// Classifies a bare property value, inferring the key.
///
/// Tried in order: the special names `any`/`assigned`, general-category
/// names, binary property names, POSIX class names, script names. Anything
/// else is preserved as [`PropertyKind::Other`] with no key.
#[must_use]
pub fn classify_value_only(value: &str) -> PropertyKind {
    let normalized = normalize(value);
    match normalized.as_str() {
        "any" => return PropertyKind::Any,
        "assigned" => return PropertyKind::Assigned,
        _ => {}
    }
    if let Some(category) = GeneralCategory::from_name(value) {
        return PropertyKind::GeneralCategory(category);
    }
    if let Some(binary) = canonical_binary_property(&normalized) {
        return PropertyKind::Binary(binary.into());
    }
    if let Some(posix) = PosixClass::from_name(value) {
        return PropertyKind::Posix(posix);
    }
    if let Some(script) = canonical_script(value) {
        return PropertyKind::Script(script.into());
    }
    PropertyKind::Other {
        key: None,
        value: value.into(),
    }
}

/// Looks up a binary property by normalized name, returning the canonical
/// UCD spelling.
fn canonical_binary_property(normalized: &str) -> Option<&'static str> {
    Some(match normalized {
        "alphabetic" | "alpha" => "Alphabetic",
        "asciihexdigit" | "ahex" => "ASCII_Hex_Digit",
        "bidicontrol" => "Bidi_Control",
        "bidimirrored" => "Bidi_Mirrored",
        "cased" => "Cased",
        "caseignorable" => "Case_Ignorable",
        "changeswhencasefolded" => "Changes_When_Casefolded",
        "changeswhencasemapped" => "Changes_When_Casemapped",
        "changeswhenlowercased" => "Changes_When_Lowercased",
        "changeswhentitlecased" => "Changes_When_Titlecased",
        "changeswhenuppercased" => "Changes_When_Uppercased",
        "dash" => "Dash",
        "defaultignorablecodepoint" => "Default_Ignorable_Code_Point",
        "deprecated" => "Deprecated",
        "diacritic" => "Diacritic",
        "emoji" => "Emoji",
        "emojicomponent" => "Emoji_Component",
        "emojimodifier" => "Emoji_Modifier",
        "emojimodifierbase" => "Emoji_Modifier_Base",
        "emojipresentation" => "Emoji_Presentation",
        "extendedpictographic" => "Extended_Pictographic",
        "extender" => "Extender",
        "graphemebase" => "Grapheme_Base",
        "graphemeextend" => "Grapheme_Extend",
        "hexdigit" => "Hex_Digit",
        "idcontinue" => "ID_Continue",
        "ideographic" => "Ideographic",
        "idstart" => "ID_Start",
        "joincontrol" => "Join_Control",
        "logicalorderexception" => "Logical_Order_Exception",
        "lowercase" => "Lowercase",
        "math" => "Math",
        "noncharactercodepoint" => "Noncharacter_Code_Point",
        "patternsyntax" => "Pattern_Syntax",
        "patternwhitespace" => "Pattern_White_Space",
        "quotationmark" => "Quotation_Mark",
        "radical" => "Radical",
        "regionalindicator" => "Regional_Indicator",
        "sentenceterminal" => "Sentence_Terminal",
        "softdotted" => "Soft_Dotted",
        "terminalpunctuation" => "Terminal_Punctuation",
        "unifiedideograph" => "Unified_Ideograph",
        "uppercase" => "Uppercase",
        "variationselector" => "Variation_Selector",
        "whitespace" => "White_Space",
        "xidcontinue" => "XID_Continue",
        "xidstart" => "XID_Start",
        _ => return None,
    })
}

/// Looks up a script by loosely-matched name or short code, returning the
/// canonical spelling.
fn canonical_script(name: &str) -> Option<&'static str> {
    let normalized = normalize(name);
    Some(match normalized.as_str() {
        "adlam" => "Adlam",
        "arabic" | "arab" => "Arabic",
        "armenian" | "armn" => "Armenian",
        "avestan" => "Avestan",
        "balinese" => "Balinese",
        "bamum" => "Bamum",
        "bengali" | "beng" => "Bengali",
        "bopomofo" | "bopo" => "Bopomofo",
        "braille" | "brai" => "Braille",
        "buginese" => "Buginese",
        "buhid" => "Buhid",
        "canadianaboriginal" | "cans" => "Canadian_Aboriginal",
        "carian" => "Carian",
        "chakma" => "Chakma",
        "cham" => "Cham",
        "cherokee" | "cher" => "Cherokee",
        "common" | "zyyy" => "Common",
        "coptic" | "copt" => "Coptic",
        "cuneiform" | "xsux" => "Cuneiform",
        "cypriot" => "Cypriot",
        "cyrillic" | "cyrl" => "Cyrillic",
        "deseret" | "dsrt" => "Deseret",
        "devanagari" | "deva" => "Devanagari",
        "egyptianhieroglyphs" | "egyp" => "Egyptian_Hieroglyphs",
        "ethiopic" | "ethi" => "Ethiopic",
        "georgian" | "geor" => "Georgian",
        "glagolitic" | "glag" => "Glagolitic",
        "gothic" | "goth" => "Gothic",
        "greek" | "grek" => "Greek",
        "gujarati" | "gujr" => "Gujarati",
        "gurmukhi" | "guru" => "Gurmukhi",
        "han" | "hani" => "Han",
        "hangul" | "hang" => "Hangul",
        "hanunoo" | "hano" => "Hanunoo",
        "hebrew" | "hebr" => "Hebrew",
        "hiragana" | "hira" => "Hiragana",
        "inherited" | "zinh" => "Inherited",
        "javanese" | "java" => "Javanese",
        "kannada" | "knda" => "Kannada",
        "katakana" | "kana" => "Katakana",
        "kharoshthi" | "khar" => "Kharoshthi",
        "khmer" | "khmr" => "Khmer",
        "lao" | "laoo" => "Lao",
        "latin" | "latn" => "Latin",
        "lepcha" => "Lepcha",
        "limbu" => "Limbu",
        "lisu" => "Lisu",
        "lycian" => "Lycian",
        "lydian" => "Lydian",
        "malayalam" | "mlym" => "Malayalam",
        "mandaic" => "Mandaic",
        "meeteimayek" | "mtei" => "Meetei_Mayek",
        "mongolian" | "mong" => "Mongolian",
        "myanmar" | "mymr" => "Myanmar",
        "newtailue" | "talu" => "New_Tai_Lue",
        "nko" | "nkoo" => "Nko",
        "ogham" | "ogam" => "Ogham",
        "olchiki" | "olck" => "Ol_Chiki",
        "oriya" | "orya" => "Oriya",
        "osage" | "osge" => "Osage",
        "osmanya" | "osma" => "Osmanya",
        "phagspa" | "phag" => "Phags_Pa",
        "phoenician" | "phnx" => "Phoenician",
        "rejang" => "Rejang",
        "runic" | "runr" => "Runic",
        "samaritan" | "samr" => "Samaritan",
        "saurashtra" | "saur" => "Saurashtra",
        "sharada" | "shrd" => "Sharada",
        "shavian" | "shaw" => "Shavian",
        "sinhala" | "sinh" => "Sinhala",
        "sundanese" | "sund" => "Sundanese",
        "sylotinagri" | "sylo" => "Syloti_Nagri",
        "syriac" | "syrc" => "Syriac",
        "tagalog" | "tglg" => "Tagalog",
        "tagbanwa" | "tagb" => "Tagbanwa",
        "taile" | "tale" => "Tai_Le",
        "taitham" | "lana" => "Tai_Tham",
        "taiviet" | "tavt" => "Tai_Viet",
        "takri" | "takr" => "Takri",
        "tamil" | "taml" => "Tamil",
        "telugu" | "telu" => "Telugu",
        "thaana" | "thaa" => "Thaana",
        "thai" => "Thai",
        "tibetan" | "tibt" => "Tibetan",
        "tifinagh" | "tfng" => "Tifinagh",
        "ugaritic" | "ugar" => "Ugaritic",
        "vai" | "vaii" => "Vai",
        "yi" | "yiii" => "Yi",
        _ => return None,
    })
}
