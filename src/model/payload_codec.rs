//! Conversion of node payloads to and from their text form.
//!
//! The braced writer and parser never look into payloads; they call a codec
//! once per node instead:
//! - **Writing**: [`render`](PayloadRenderer::render) of a [PayloadRenderer] turns
//!   a payload into the text placed between the quotes
//! - **Parsing**: [`parse`](PayloadCodec::parse) of a [PayloadCodec] turns the
//!   quoted text back into a payload
//!
//! Writing only needs a [PayloadRenderer]; every [PayloadCodec] is one.
//!
//! # Built-in implementations
//! * [TextCodec] - renders any payload implementing [Display], and parses
//!   payloads that also implement [FromStr]
//! * [FnCodec] - for a pair of closures

use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;

// =#========================================================================#=
// PAYLOAD RENDERER / CODEC (traits)
// =#========================================================================#=
/// Abstraction for converting payloads to text.
///
/// # Implementing this trait
/// Rendered text must not contain the characters `"`, `{`, `}` or `$`,
/// which delimit the braced format; the writer rejects such text.
pub trait PayloadRenderer {
    /// The payload type handled by this codec.
    type Payload;

    /// Renders a payload as text.
    fn render(&self, payload: &Self::Payload) -> String;
}

/// Abstraction for converting payloads to text and back.
///
/// Parsing should accept whatever [`render`](PayloadRenderer::render) produces.
pub trait PayloadCodec: PayloadRenderer {
    /// Parses text back into a payload.
    ///
    /// # Errors
    /// A human-readable reason if the text is not a valid payload.
    fn parse(&self, text: &str) -> Result<Self::Payload, String>;
}

// =#========================================================================#=
// TEXT CODEC
// =#========================================================================#=
/// Codec based on the payload's [Display] and [FromStr] implementations.
///
/// Rendering only requires [Display].
///
/// # Example
/// ```
/// use bracetree::model::{PayloadCodec, PayloadRenderer, TextCodec};
///
/// let codec = TextCodec::<u32>::new();
/// assert_eq!(codec.render(&42), "42");
/// assert_eq!(codec.parse("7"), Ok(7));
/// assert!(codec.parse("seven").is_err());
/// ```
pub struct TextCodec<T> {
    _payload: PhantomData<fn() -> T>,
}

impl<T> TextCodec<T> {
    pub fn new() -> Self {
        TextCodec { _payload: PhantomData }
    }
}

impl<T> Default for TextCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Display> PayloadRenderer for TextCodec<T> {
    type Payload = T;

    fn render(&self, payload: &T) -> String {
        payload.to_string()
    }
}

impl<T> PayloadCodec for TextCodec<T>
where
    T: Display + FromStr,
    T::Err: Display,
{
    fn parse(&self, text: &str) -> Result<T, String> {
        text.parse::<T>().map_err(|err| err.to_string())
    }
}

// =#========================================================================#=
// FN CODEC
// =#========================================================================#=
/// Codec built from a render closure and a parse closure.
///
/// # Example
/// ```
/// use bracetree::model::{FnCodec, PayloadCodec, PayloadRenderer};
///
/// let codec = FnCodec::new(
///     |flag: &bool| if *flag { "yes".to_string() } else { "no".to_string() },
///     |text: &str| match text {
///         "yes" => Ok(true),
///         "no" => Ok(false),
///         other => Err(format!("expected yes or no, got {other}")),
///     },
/// );
/// assert_eq!(codec.render(&true), "yes");
/// assert_eq!(codec.parse("no"), Ok(false));
/// ```
pub struct FnCodec<T, R, P> {
    render: R,
    parse: P,
    _payload: PhantomData<fn() -> T>,
}

impl<T, R, P> FnCodec<T, R, P>
where
    R: Fn(&T) -> String,
    P: Fn(&str) -> Result<T, String>,
{
    pub fn new(render: R, parse: P) -> Self {
        FnCodec { render, parse, _payload: PhantomData }
    }
}

impl<T, R, P> PayloadRenderer for FnCodec<T, R, P>
where
    R: Fn(&T) -> String,
{
    type Payload = T;

    fn render(&self, payload: &T) -> String {
        (self.render)(payload)
    }
}

impl<T, R, P> PayloadCodec for FnCodec<T, R, P>
where
    R: Fn(&T) -> String,
    P: Fn(&str) -> Result<T, String>,
{
    fn parse(&self, text: &str) -> Result<T, String> {
        (self.parse)(text)
    }
}
