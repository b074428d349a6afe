//! CLI adapter.
//!
//! Translates argv-style tokens into the same request-environment shape
//! the pipeline consumes. This is a data-shape contract only: the first
//! token names the controller, the second the action, and remaining
//! tokens are parameters (`key=value` pairs, or bare tokens stored under
//! numeric indices). The synthesized path lets the router treat a CLI
//! invocation exactly like a transport request.

use hermes_core::Environment;
use serde_json::Value;

/// Key holding the CLI-supplied controller token.
pub const CLI_CONTROLLER_KEY: &str = "cli.controller";

/// Key holding the CLI-supplied action token.
pub const CLI_ACTION_KEY: &str = "cli.action";

/// Key holding the CLI-supplied parameter map.
pub const CLI_PARAMETERS_KEY: &str = "cli.parameters";

/// Method string marking environments that came from the CLI adapter.
pub const CLI_METHOD: &str = "CLI";

/// Builds a request environment from argv-style tokens (the program name
/// already stripped).
pub fn environment_from_argv<I, S>(argv: I) -> Environment
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let tokens: Vec<String> = argv
        .into_iter()
        .map(|token| token.as_ref().to_string())
        .collect();

    let controller = tokens.first().cloned().unwrap_or_default();
    let action = tokens.get(1).cloned().unwrap_or_default();

    let mut parameters = serde_json::Map::new();
    let mut positional = 0usize;
    let mut path = controller.clone();
    if !action.is_empty() {
        path.push('/');
        path.push_str(&action);
    }

    for token in tokens.iter().skip(2) {
        match token.split_once('=') {
            Some((key, value)) => {
                parameters.insert(key.to_string(), Value::String(value.to_string()));
                path.push('/');
                path.push_str(key);
                path.push('/');
                path.push_str(value);
            }
            None => {
                parameters.insert(positional.to_string(), Value::String(token.clone()));
                positional += 1;
                path.push('/');
                path.push_str(token);
            }
        }
    }

    let mut env = Environment::new(CLI_METHOD, path);
    env.set(CLI_CONTROLLER_KEY, controller);
    env.set(CLI_ACTION_KEY, action);
    env.set(CLI_PARAMETERS_KEY, Value::Object(parameters));
    env
}
