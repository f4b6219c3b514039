//! Template TOML config with inline documentation comments.

/// Generate the template TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# tjchat configuration
# Fill in api_key (and base_url/model for non-OpenAI endpoints), then rerun.

[api]
provider = "openai"          # which [api.<name>] section to use

[api.openai]
base_url = "https://api.openai.com/v1"
api_key = ""
model = "gpt-4o-mini"
# timeout = 30               # seconds per attempt, 1-600
# retry_count = 3            # retries after the first attempt, 0-10
# retry_delay = 1.0          # constant delay between attempts, 0-60 seconds
# temperature = 0.7          # 0.0-1.0
# max_tokens = 2000

# Any OpenAI-compatible endpoint can be added as another section:
# [api.siliconflow]
# base_url = "https://api.siliconflow.cn/v1"
# api_key = ""
# model = "Qwen/Qwen2.5-7B-Instruct"

[chat]
# system_prompt = "You are a helpful AI assistant."

[logging]
# level = "INFO"             # DEBUG, INFO, WARNING, ERROR
# file = "app.log"           # empty string logs to the console only
# backup_count = 5           # rotated files kept, 0-100
"##
    .to_string()
}
