//! Fixed assistant texts: greeting, persona instruction, and the canned
//! guidance appended on the non-chat branches.

use saathi_core::SaathiError;

/// National Cyber Crime Helpline number referenced in emergency guidance.
pub const EMERGENCY_HELPLINE: &str = "1930";

/// Seed greeting for a fresh session.
pub const GREETING: &str = "Hello! I'm CyberSaathi, your AI-powered cybersecurity assistant. \
I'm here to help you stay safe online.\n\n\
I can assist you with:\n\
• **Reporting cyber crimes**\n\
• **Checking website safety**\n\
• **Providing security tips**\n\
• **Emergency cyber help**\n\n\
How can I help protect you today?";

/// System-role instruction prepended to every chat-completion request.
/// Never part of the visible history.
pub const SYSTEM_PROMPT: &str = "You are CyberSaathi, an official cybersecurity assistant for \
Indian users. Provide helpful, accurate information about cybersecurity, cyber crimes, and \
digital safety. Keep responses concise but informative. Always prioritize user safety and \
direct them to appropriate authorities when needed.";

/// Guidance appended when scan intent is detected but no URL was found.
/// No remote call is made on this branch.
pub const NO_URL_GUIDANCE: &str = "⚠️ **No valid URL found**\n\n\
Please provide a URL starting with http:// or https://\n\n\
**Example:**\n`scan url https://example.com`";

/// Fallback appended when the chat-completion operation fails. Low-level
/// error detail is deliberately not exposed here.
pub const CHAT_FALLBACK: &str = "⚠️ I'm experiencing technical difficulties. Please try again \
or contact our emergency helpline at **1930** for immediate assistance.";

/// Interim notice appended before the scan operation is invoked.
pub fn scanning_notice(url: &str) -> String {
    format!(
        "🔍 **Scanning URL**: {url}\n\n\
         ⏳ Analyzing website for potential threats...\n\
         This may take up to 30 seconds."
    )
}

/// Guidance appended when the scan operation fails.
pub fn scan_failure_notice(error: &SaathiError) -> String {
    format!(
        "⚠️ **Scan Error**: {error}\n\n\
         Please ensure:\n\
         • The URL is valid and accessible\n\
         • You have an internet connection\n\
         • Try again in a few moments"
    )
}
