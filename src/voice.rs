const VOICE: &str = "Polly.Andres-Neural";
const LANGUAGE: &str = "es-MX";

/// Spoken when no position is cached for the requested vehicle. The IVR
/// platform cannot interpret HTTP errors, so every miss gets this apology.
pub const FALLBACK_MESSAGE: &str = "Lo sentimos, no se pudo obtener la información en este momento. Por favor, intente nuevamente más tarde.";

/// Wraps `text` in the speech markup the telephony platform consumes.
pub fn render_say(text: &str) -> String {
    format!(
        "<Response>\n  <Say voice=\"{}\" language=\"{}\">{}</Say>\n</Response>",
        VOICE,
        LANGUAGE,
        escape_text(text)
    )
}

// Text-node escaping only; attribute values above are fixed constants.
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
