//! Token sets accepted by a Polly endpoint.

/// Output formats accepted by `SynthesizeSpeech`.
pub const OUTPUT_FORMATS: &[&str] = &["json", "mp3", "ogg_vorbis", "pcm"];

/// Language codes accepted by `SynthesizeSpeech`.
pub const LANGUAGE_CODES: &[&str] = &[
    "arb", "cmn-CN", "cy-GB", "da-DK", "de-DE", "en-AU", "en-GB", "en-GB-WLS", "en-IN", "en-US",
    "es-ES", "es-MX", "es-US", "fr-CA", "fr-FR", "is-IS", "it-IT", "ja-JP", "hi-IN", "ko-KR",
    "nb-NO", "nl-NL", "pl-PL", "pt-BR", "pt-PT", "ro-RO", "ru-RU", "sv-SE", "tr-TR", "en-NZ",
    "en-ZA", "ca-ES", "de-AT", "yue-CN", "ar-AE", "fi-FI", "en-IE", "nl-BE", "fr-BE", "cs-CZ",
    "de-CH", "en-SG",
];

/// Voice ids accepted by `SynthesizeSpeech`.
pub const VOICE_IDS: &[&str] = &[
    "Aditi", "Amy", "Astrid", "Bianca", "Brian", "Camila", "Carla", "Carmen", "Celine", "Chantal",
    "Conchita", "Cristiano", "Dora", "Emma", "Enrique", "Ewa", "Filiz", "Gabrielle", "Geraint",
    "Giorgio", "Gwyneth", "Hans", "Ines", "Ivy", "Jacek", "Jan", "Joanna", "Joey", "Justin",
    "Karl", "Kendra", "Kevin", "Kimberly", "Lea", "Liv", "Lotte", "Lucia", "Lupe", "Mads", "Maja",
    "Marlene", "Mathieu", "Matthew", "Maxim", "Mia", "Miguel", "Mizuki", "Naja", "Nicole",
    "Olivia", "Penelope", "Raveena", "Ricardo", "Ruben", "Russell", "Salli", "Seoyeon", "Takumi",
    "Tatyana", "Vicki", "Vitoria", "Zeina", "Zhiyu", "Aria", "Ayanda", "Arlet", "Hannah",
    "Arthur", "Daniel", "Liam", "Pedro", "Kajal", "Hiujin", "Laura", "Elin", "Ida", "Suvi", "Ola",
    "Hala", "Andres", "Sergio", "Remi", "Adriano", "Thiago", "Ruth", "Stephen", "Kazuha",
    "Tomoko", "Niamh", "Sofie", "Lisa", "Isabelle", "Zayd", "Danielle", "Gregory", "Burcu",
];

/// Output formats, locales and voices a transport accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    output_formats: Vec<String>,
    language_codes: Vec<String>,
    voice_ids: Vec<String>,
}

impl Catalog {
    pub fn new<F, L, V>(output_formats: F, language_codes: L, voice_ids: V) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        L: IntoIterator,
        L::Item: Into<String>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        Self {
            output_formats: output_formats.into_iter().map(Into::into).collect(),
            language_codes: language_codes.into_iter().map(Into::into).collect(),
            voice_ids: voice_ids.into_iter().map(Into::into).collect(),
        }
    }

    /// The sets published by Amazon Polly.
    pub fn polly() -> Self {
        Self::new(
            OUTPUT_FORMATS.iter().copied(),
            LANGUAGE_CODES.iter().copied(),
            VOICE_IDS.iter().copied(),
        )
    }

    pub fn output_formats(&self) -> &[String] {
        &self.output_formats
    }

    pub fn language_codes(&self) -> &[String] {
        &self.language_codes
    }

    pub fn voice_ids(&self) -> &[String] {
        &self.voice_ids
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::polly()
    }
}
