// UI Constants
pub const HEAVY_DOWN_AND_RIGHT: char = '┏';
pub const HEAVY_DOWN_AND_LEFT: char = '┓';
pub const HEAVY_UP_AND_RIGHT: char = '┗';
pub const HEAVY_UP_AND_LEFT: char = '┛';
pub const HEAVY_HORIZONTAL: char = '━';
pub const HEAVY_VERTICAL: char = '┃';

pub const HEADER_WIDTH: usize = 60;

// App Constants
pub const APP_NAME: &str = "shopclerk";
pub const APP_BOOT_MESSAGE: &str = "shopclerk session started";
pub const CHAT_PROMPT: &str = "you ▸ ";
pub const SPINNER_TEXT: &str = "Looking through the catalog...";
pub const INITIAL_AI_MESSAGE: &str =
    "Hi! Tell me what you're looking for and I'll recommend something from our catalog. \
Type 'exit' to leave.";

// User-facing error messages. Deliberately generic: internal detail
// goes to the log file only.
pub const INITIALIZE_ERROR_MESSAGE: &str = "Something went wrong while starting the assistant.";
pub const RETRIEVAL_ERROR_MESSAGE: &str =
    "Something went wrong while looking for a recommendation.";
pub const RENDER_ERROR_MESSAGE: &str = "Something went wrong while displaying the response.";
pub const CONVERSATION_LOG_ERROR_MESSAGE: &str =
    "Something went wrong while displaying the conversation log.";
pub const COMMON_ERROR_FOOTER: &str =
    "If this keeps happening, please contact the administrator.";

// API Constants
pub const CLAUDE_API_BASE_URL: &str = "https://api.anthropic.com";
pub const MESSAGES_ENDPOINT: &str = "/v1/messages";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";
pub const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
