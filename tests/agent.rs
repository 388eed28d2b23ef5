use anyhow::{anyhow, Result};

use relay_agent::agent::{self, SYSTEM_PROMPT};
use relay_agent::environment::local::LocalEnvironment;
use relay_agent::environment::Environment;
use relay_agent::errors::ProviderError;
use relay_agent::models::message::{Message, Role};
use relay_agent::providers::configs::openai::OpenAiProviderConfig;
use relay_agent::providers::mock::MockProvider;
use relay_agent::providers::openai::OpenAiProvider;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    ListMessages,
    Completion(Vec<Message>),
    AddReply(String),
    RequestUserInput,
}

/// Records every capability call and answers with canned values
struct StubEnvironment {
    history: Vec<Message>,
    completion: Result<String, String>,
    fail_history: bool,
    fail_reply: bool,
    calls: std::cell::RefCell<Vec<Call>>,
}

impl StubEnvironment {
    fn new(history: Vec<Message>, completion: &str) -> Self {
        Self {
            history,
            completion: Ok(completion.to_string()),
            fail_history: false,
            fail_reply: false,
            calls: Default::default(),
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn completion_input(&self) -> Vec<Message> {
        self.calls()
            .into_iter()
            .find_map(|call| match call {
                Call::Completion(messages) => Some(messages),
                _ => None,
            })
            .expect("completion was not called")
    }
}

impl Environment for StubEnvironment {
    fn list_messages(&self) -> Result<Vec<Message>> {
        self.calls.borrow_mut().push(Call::ListMessages);
        if self.fail_history {
            return Err(anyhow!("history unavailable"));
        }
        Ok(self.history.clone())
    }

    fn completion(&self, messages: &[Message]) -> Result<String> {
        self.calls
            .borrow_mut()
            .push(Call::Completion(messages.to_vec()));
        self.completion.clone().map_err(|e| anyhow!(e))
    }

    fn add_reply(&mut self, reply: String) -> Result<()> {
        self.calls.borrow_mut().push(Call::AddReply(reply));
        if self.fail_reply {
            return Err(anyhow!("reply channel closed"));
        }
        Ok(())
    }

    fn request_user_input(&mut self) -> Result<()> {
        self.calls.borrow_mut().push(Call::RequestUserInput);
        Ok(())
    }
}

#[test]
fn test_empty_history_turn() -> Result<()> {
    let mut env = StubEnvironment::new(vec![], "ok");
    agent::run(&mut env)?;

    assert_eq!(
        env.calls(),
        vec![
            Call::ListMessages,
            Call::Completion(vec![Message::system("gh-upload-test")]),
            Call::AddReply("ok".to_string()),
            Call::RequestUserInput,
        ]
    );
    Ok(())
}

#[test]
fn test_single_user_message() -> Result<()> {
    let mut env = StubEnvironment::new(vec![Message::user("hi")], "hello");
    agent::run(&mut env)?;

    assert_eq!(
        env.completion_input(),
        vec![Message::system("gh-upload-test"), Message::user("hi")]
    );
    Ok(())
}

#[test]
fn test_history_order_preserved() -> Result<()> {
    let history = vec![
        Message::user("first"),
        Message::assistant("second"),
        Message::user("third"),
        Message::system("fourth"),
    ];
    let mut env = StubEnvironment::new(history.clone(), "ok");
    agent::run(&mut env)?;

    let sent = env.completion_input();
    assert_eq!(sent.len(), history.len() + 1);
    assert_eq!(sent[0].role, Role::System);
    assert_eq!(sent[0].content, SYSTEM_PROMPT);
    assert_eq!(&sent[1..], history.as_slice());
    Ok(())
}

#[test]
fn test_reply_is_completion_value_and_input_requested_last() -> Result<()> {
    let mut env = StubEnvironment::new(vec![Message::user("hi")], "exact reply text");
    agent::run(&mut env)?;

    let calls = env.calls();
    let replies: Vec<_> = calls
        .iter()
        .filter(|call| matches!(call, Call::AddReply(_)))
        .collect();
    assert_eq!(replies, vec![&Call::AddReply("exact reply text".to_string())]);

    let requests = calls
        .iter()
        .filter(|call| matches!(call, Call::RequestUserInput))
        .count();
    assert_eq!(requests, 1);
    assert_eq!(calls.last(), Some(&Call::RequestUserInput));
    Ok(())
}

#[test]
fn test_completion_failure_stops_turn() {
    let mut env = StubEnvironment::new(vec![Message::user("hi")], "");
    env.completion = Err("model offline".to_string());

    let err = agent::run(&mut env).unwrap_err();
    assert_eq!(err.to_string(), "model offline");

    let calls = env.calls();
    assert!(!calls.iter().any(|call| matches!(call, Call::AddReply(_))));
    assert!(!calls.contains(&Call::RequestUserInput));
}

#[test]
fn test_history_failure_propagates_unchanged() {
    let mut env = StubEnvironment::new(vec![], "ok");
    env.fail_history = true;

    let err = agent::run(&mut env).unwrap_err();
    assert_eq!(err.to_string(), "history unavailable");
    assert_eq!(env.calls(), vec![Call::ListMessages]);
}

#[test]
fn test_reply_failure_skips_input_request() {
    let mut env = StubEnvironment::new(vec![], "ok");
    env.fail_reply = true;

    let err = agent::run(&mut env).unwrap_err();
    assert_eq!(err.to_string(), "reply channel closed");
    assert!(!env.calls().contains(&Call::RequestUserInput));
}

#[test]
fn test_local_environment_conversation() -> Result<()> {
    let provider = MockProvider::new(vec!["Hello!", "Still here."]);
    let mut env = LocalEnvironment::new(provider.clone(), "mock");

    env.add_user_message("hi");
    agent::run(&mut env)?;
    assert!(env.awaiting_input());
    assert_eq!(env.take_replies(), vec!["Hello!".to_string()]);

    env.add_user_message("are you there?");
    agent::run(&mut env)?;
    assert_eq!(env.take_replies(), vec!["Still here.".to_string()]);

    let requests = provider.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(
        requests[1],
        vec![
            Message::system(SYSTEM_PROMPT),
            Message::user("hi"),
            Message::assistant("Hello!"),
            Message::user("are you there?"),
        ]
    );

    // the system prompt is never stored in the host's history
    assert!(env.history().iter().all(|m| m.role != Role::System));
    Ok(())
}

#[test]
fn test_local_environment_provider_failure() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(503)
        .create();

    let provider = OpenAiProvider::new(OpenAiProviderConfig::new(
        "test_api_key".to_string(),
        server.url(),
    ))?;
    let mut env = LocalEnvironment::new(provider, "gpt-4o");
    env.add_user_message("hi");

    let err = agent::run(&mut env).unwrap_err();

    mock.assert();
    assert!(matches!(
        err.downcast_ref::<ProviderError>(),
        Some(ProviderError::Server(_))
    ));
    assert_eq!(err.to_string(), "Server error: 503 Service Unavailable");
    assert!(!env.awaiting_input());
    assert!(env.take_replies().is_empty());
    assert_eq!(env.history(), &[Message::user("hi")]);
    Ok(())
}
