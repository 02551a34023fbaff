//! Integration tests for the command tree

mod common;

use common::argv;
use prisma_cli::cli::{App, Command, CommandGroup};
use prisma_cli::config::Environment;
use prisma_cli::error::{CliError, Outcome};
use prisma_cli::ui::{Prompt, PromptSpec};
use std::cell::RefCell;
use std::rc::Rc;

struct Answer(Option<String>);

impl Prompt for Answer {
    fn ask(&self, _spec: &PromptSpec) -> anyhow::Result<Option<String>> {
        Ok(self.0.clone())
    }
}

fn help_text(outcome: Outcome) -> String {
    match outcome {
        Err(CliError::Help(err)) => err.text().to_string(),
        other => panic!("expected help error, got {:?}", other),
    }
}

#[test]
fn test_child_receives_exact_slice() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let recorder = {
        let seen = Rc::clone(&seen);
        move |args: &[String]| -> Outcome {
            seen.borrow_mut().push(args.to_vec());
            Ok(args.join(" "))
        }
    };

    let group = CommandGroup::new(
        "Usage: test",
        [("child", Box::new(recorder) as Box<dyn Command>)],
    );

    let out = group
        .parse(&argv(&["child", "-n", "x", "--help", "tail"]))
        .unwrap();

    assert_eq!(out, "-n x --help tail");
    assert_eq!(*seen.borrow(), vec![argv(&["-n", "x", "--help", "tail"])]);
}

#[test]
fn test_group_help_flag_before_child_wins() {
    let group = CommandGroup::new(
        "Usage: test",
        [(
            "child",
            Box::new(|_: &[String]| -> Outcome { Ok("ran".to_string()) }) as Box<dyn Command>,
        )],
    );

    assert_eq!(help_text(group.parse(&argv(&["-h", "child"]))), "Usage: test\n");
    assert_eq!(group.parse(&argv(&["child", "-h"])).unwrap(), "ran");
}

#[test]
fn test_app_end_to_end_outcomes() {
    let app = App::new(&Environment::default(), Box::new(Answer(None)));

    assert_eq!(help_text(app.run(&[])), app.root().help().as_str());
    assert!(app
        .run(&argv(&["migrate", "new", "--name", "foo"]))
        .unwrap()
        .contains("foo"));
    assert!(help_text(app.run(&argv(&["bogus"]))).contains("Unknown command \"bogus\""));
    assert!(help_text(app.run(&argv(&["migrate", "new"]))).contains("No migration name provided"));
}

#[test]
fn test_app_uses_prompt_answer() {
    let app = App::new(&Environment::default(), Box::new(Answer(Some("prompted".to_string()))));
    let out = app.run(&argv(&["migrate", "new"])).unwrap();
    assert!(out.contains("prompted"));
}

#[test]
fn test_help_error_is_not_generic() {
    let app = App::new(&Environment::default(), Box::new(Answer(None)));
    let err = app.run(&argv(&["migrate", "--bogus"])).unwrap_err();
    assert!(err.is_help());
}
