use super::{Command, CommandError, Reply, TopicSummary, execute, run, run_lines};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use crate::broker::Registry;

async fn session(registry: &mut Registry, script: &str) -> String {
    let mut output = Vec::new();
    run(registry, script.as_bytes(), &mut output)
        .await
        .expect("session failed");
    String::from_utf8(output).expect("utf8 output")
}

#[test]
fn parse_topic_and_subscriber_commands() {
    assert_eq!(
        "subscribe t0 s0".parse::<Command>(),
        Ok(Command::Subscribe {
            topic: "t0".to_string(),
            subscriber: "s0".to_string(),
        })
    );
    assert_eq!(
        "  POLL   t0\ts0 ".parse::<Command>(),
        Ok(Command::Poll {
            topic: "t0".to_string(),
            subscriber: "s0".to_string(),
        })
    );
    assert_eq!(
        "drop s0".parse::<Command>(),
        Ok(Command::Drop {
            subscriber: "s0".to_string(),
        })
    );
    assert_eq!("exit".parse::<Command>(), Ok(Command::Quit));
    assert_eq!("topics".parse::<Command>(), Ok(Command::Topics));
}

#[test]
fn parse_publish_keeps_inner_spacing() {
    assert_eq!(
        "publish t0   hello   world ".parse::<Command>(),
        Ok(Command::Publish {
            topic: "t0".to_string(),
            payload: "hello   world".to_string(),
        })
    );
}

#[test]
fn parse_errors() {
    assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
    assert_eq!(
        "frobnicate t0".parse::<Command>(),
        Err(CommandError::Unknown("frobnicate".to_string()))
    );
    assert_eq!(
        "subscribe t0".parse::<Command>(),
        Err(CommandError::MissingArgument {
            command: "subscribe",
            argument: "subscriber",
        })
    );
    assert_eq!(
        "publish t0".parse::<Command>(),
        Err(CommandError::MissingArgument {
            command: "publish",
            argument: "payload",
        })
    );
    assert_eq!(
        "poll t0 s0 extra".parse::<Command>(),
        Err(CommandError::UnexpectedArgument {
            command: "poll",
            argument: "extra".to_string(),
        })
    );
}

#[test]
fn exit_errors_name_the_typed_command() {
    assert_eq!(
        "exit now".parse::<Command>(),
        Err(CommandError::UnexpectedArgument {
            command: "exit",
            argument: "now".to_string(),
        })
    );
    assert_eq!(
        "quit now".parse::<Command>(),
        Err(CommandError::UnexpectedArgument {
            command: "quit",
            argument: "now".to_string(),
        })
    );
}

#[test]
fn reply_rendering() {
    assert_eq!(Reply::Ok.to_string(), "ok");
    assert_eq!(
        Reply::Messages(vec!["aaa".to_string(), "say \"hi\"".to_string()]).to_string(),
        r#"["aaa","say \"hi\""]"#
    );
    assert_eq!(Reply::Messages(Vec::new()).to_string(), "[]");
    assert_eq!(Reply::Topics(Vec::new()).to_string(), "(none)");
    assert_eq!(
        Reply::Topics(vec![
            TopicSummary {
                name: "a".to_string(),
                subscribers: 1,
                retained: 0,
            },
            TopicSummary {
                name: "b".to_string(),
                subscribers: 2,
                retained: 3,
            },
        ])
        .to_string(),
        "a subscribers=1 retained=0\nb subscribers=2 retained=3"
    );
    assert_eq!(Reply::Quit.to_string(), "bye");
    assert_eq!(Reply::Error("boom".to_string()).to_string(), "error: boom");
}

#[test]
fn execute_poll_on_missing_subscription_is_an_error_reply() {
    let mut registry = Registry::new();
    let reply = execute(
        &mut registry,
        Command::Poll {
            topic: "t0".to_string(),
            subscriber: "s0".to_string(),
        },
    );
    assert_eq!(
        reply,
        Reply::Error("subscription not found: 's0' on topic 't0'".to_string())
    );
}

#[tokio::test]
async fn scripted_session_matches_expected_replies() {
    let mut registry = Registry::new();
    let script = "\
# two subscribers, one joins late
subscribe t0 s0
publish t0 aaa
subscribe t0 s1

publish t0 bbb
pending t0 s0
poll t0 s0
poll t0 s1
poll t0 s1
topics
";

    let output = session(&mut registry, script).await;
    assert_eq!(
        output,
        "ok\nok\nok\nok\n2\n[\"aaa\",\"bbb\"]\n[\"bbb\"]\n[]\nt0 subscribers=2 retained=0\n"
    );
    assert_eq!(registry.retained_messages("t0"), 0);
}

#[tokio::test]
async fn session_reports_errors_and_continues() {
    let mut registry = Registry::new();
    let script = "\
poll t0 s0
bogus
subscribe t0 s0
unsubscribe t0 s0
poll t0 s0
topics
";

    let output = session(&mut registry, script).await;
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "error: subscription not found: 's0' on topic 't0'",
            "error: unknown command 'bogus' (try 'help')",
            "ok",
            "ok",
            "error: subscription not found: 's0' on topic 't0'",
            "(none)",
        ]
    );
}

#[tokio::test]
async fn quit_stops_reading() {
    let mut registry = Registry::new();
    let output = session(&mut registry, "subscribe t0 s0\nquit\npublish t0 late\n").await;

    assert_eq!(output, "ok\nbye\n");
    assert_eq!(registry.retained_messages("t0"), 0);
    assert_eq!(registry.pending("t0", "s0"), Ok(0));
}

#[tokio::test]
async fn drop_removes_subscriber_from_all_topics() {
    let mut registry = Registry::new();
    let output = session(
        &mut registry,
        "subscribe t0 s0\nsubscribe t1 s0\nsubscribe t1 s1\ndrop s0\ntopics\n",
    )
    .await;

    assert_eq!(output, "ok\nok\nok\n2\nt1 subscribers=1 retained=0\n");
}

#[tokio::test]
async fn channel_session_ends_when_sender_is_dropped() {
    let mut registry = Registry::new();
    let (tx, mut rx) = mpsc::channel(8);
    for line in ["subscribe t0 s0", "", "publish t0 hello there", "poll t0 s0"] {
        tx.send(line.to_string()).await.unwrap();
    }
    drop(tx);

    let mut output = Vec::new();
    run_lines(&mut registry, &mut rx, &mut output).await.unwrap();
    assert_eq!(
        String::from_utf8(output).unwrap(),
        "ok\nok\n[\"hello there\"]\n"
    );
}

#[tokio::test]
async fn channel_session_quits_with_input_still_open() {
    let mut registry = Registry::new();
    let (tx, mut rx) = mpsc::channel(8);
    tx.send("quit".to_string()).await.unwrap();

    let mut output = Vec::new();
    tokio::time::timeout(
        Duration::from_secs(5),
        run_lines(&mut registry, &mut rx, &mut output),
    )
    .await
    .expect("quit did not end the session")
    .unwrap();
    assert_eq!(output, b"bye\n");
    drop(tx);
}

#[tokio::test]
async fn idle_channel_session_can_be_cancelled() {
    let mut registry = Registry::new();
    // sender stays alive and silent, like a terminal nobody types into
    let (tx, mut rx) = mpsc::channel::<String>(8);
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let mut output = Vec::new();

    stop_tx.send(()).unwrap();
    let cancelled = tokio::time::timeout(Duration::from_secs(5), async {
        tokio::select! {
            res = run_lines(&mut registry, &mut rx, &mut output) => {
                res.unwrap();
                false
            }
            _ = stop_rx => true,
        }
    })
    .await
    .expect("idle session did not yield to cancellation");

    assert!(cancelled);
    assert!(output.is_empty());
    drop(tx);
}
