//! The operations behind each subcommand, written against the repository so they can be
//! driven from tests with an in-memory store.
use faultline_error::{
    Admission, Boundary, ErrorPolicy, Failure, Result, ResultExt, Subkind, checked_div,
};
use faultline_repo::Repository;
use faultline_store::Store;

use crate::error::CliError;
use crate::prompt::Prompt;

/// Read a record, asking for another name each time the requested one does not exist.
///
/// Only a missing record is remedied here. Any other failure, or running out of attempts
/// or answers, goes back to the caller.
pub async fn read_with_retry<S, E, P>(
    repo: &Repository<S>,
    boundary: &Boundary<E>,
    prompt: &mut P,
    name: &str,
    max_attempts: usize,
) -> Result<(String, String)>
where
    S: Store,
    E: ErrorPolicy,
    P: Prompt,
{
    if max_attempts == 0 {
        return Err(CliError::NoAttempts.into());
    }
    let mut name = name.to_string();
    let mut attempt = 1;
    loop {
        let failure: Failure = match repo.load(&name).await {
            Ok(contents) => return Ok((name, contents)),
            Err(e) => e.into(),
        };
        if failure.subkind() != Some(&Subkind::NOT_FOUND) || attempt >= max_attempts {
            return Err(failure);
        }
        let failure = match boundary.admit(failure) {
            Admission::Consume(failure) => failure,
            Admission::Propagate(failure) => return Err(failure),
        };
        match prompt.ask(&format!("{failure}. Another name: "))? {
            Some(next) => name = next,
            None => return Err(failure),
        }
        attempt += 1;
    }
}

/// Leading lines of a record. A negative count is a bug in the caller: it is logged here
/// and left to propagate.
pub async fn head<S: Store>(
    repo: &Repository<S>,
    policy: &impl ErrorPolicy,
    name: &str,
    count: i64,
) -> Result<Vec<String>> {
    repo.head(name, count)
        .await
        .map_err(Failure::from)
        .emit_defect(policy)
}

pub async fn counter<S: Store>(repo: &Repository<S>, name: &str) -> Result<i64> {
    Ok(repo.counter(name).await?)
}

pub async fn increment<S: Store>(repo: &Repository<S>, name: &str, by: i64) -> Result<i64> {
    Ok(repo.increment(name, by).await?)
}

pub fn divide(dividend: i64, divisor: i64) -> Result<i64> {
    checked_div(dividend, divisor)
}

/// Count words on the blocking pool. A panic in the worker comes back as a defect.
pub async fn word_count<S: Store>(repo: &Repository<S>, name: &str) -> Result<usize> {
    let contents = repo.load(name).await?;
    let count = tokio::task::spawn_blocking(move || contents.split_whitespace().count())
        .await
        .map_err(CliError::from)?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::ScriptedPrompt;
    use faultline_error::{Domain, FailureKind, NoopPolicy, PropagationPolicy};
    use faultline_store::{MemoryStore, StoreError};
    use pretty_assertions::assert_eq;

    fn repo() -> Repository<MemoryStore> {
        Repository::new(MemoryStore::with_entries([
            ("summary", "all good\n"),
            ("notes", "a b  c\nd"),
        ]))
    }

    fn boundary() -> Boundary<NoopPolicy> {
        Boundary::new(Domain::CLI, NoopPolicy)
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let mut prompt = ScriptedPrompt::new(["nope", "still-nope", "summary"]);
        let failure = read_with_retry(&repo(), &boundary(), &mut prompt, "missing", 2)
            .await
            .unwrap_err();
        assert!(failure.is(FailureKind::RecoverableExternal, Some(&Subkind::NOT_FOUND)));
        assert!(failure.message().contains("nope"));
        assert_eq!(prompt.asked().len(), 1);
    }

    #[tokio::test]
    async fn gives_up_when_the_user_has_no_answer() {
        let mut prompt = ScriptedPrompt::default();
        let failure = read_with_retry(&repo(), &boundary(), &mut prompt, "missing", 3)
            .await
            .unwrap_err();
        assert!(failure.message().contains("missing"));
    }

    #[tokio::test]
    async fn only_missing_records_are_retried() {
        let repo = repo();
        repo.store()
            .fail_with("summary", StoreError::Corrupted("torn write".into()));
        let mut prompt = ScriptedPrompt::new(["notes"]);
        let failure = read_with_retry(&repo, &boundary(), &mut prompt, "summary", 3)
            .await
            .unwrap_err();
        assert!(failure.is_fatal());
        assert!(prompt.asked().is_empty());
    }

    #[tokio::test]
    async fn zero_attempts_is_a_defect() {
        let mut prompt = ScriptedPrompt::default();
        let failure = read_with_retry(&repo(), &boundary(), &mut prompt, "summary", 0)
            .await
            .unwrap_err();
        assert_eq!(failure.kind(), FailureKind::ProgrammingDefect);
    }

    #[tokio::test]
    async fn tolerated_defects_do_not_change_retry_scope() {
        let boundary = boundary().with_policy(PropagationPolicy {
            tolerate_defects: true,
        });
        let mut prompt = ScriptedPrompt::new(["summary"]);
        let failure = read_with_retry(&repo(), &boundary, &mut prompt, "../escape", 3)
            .await
            .unwrap_err();
        assert_eq!(failure.kind(), FailureKind::ProgrammingDefect);
        assert!(prompt.asked().is_empty());
    }

    #[tokio::test]
    async fn word_count_runs_in_background() {
        assert_eq!(word_count(&repo(), "notes").await.unwrap(), 4);
    }

    #[test]
    fn divide_by_zero_is_a_defect() {
        let failure = divide(10, 0).unwrap_err();
        assert_eq!(failure.subkind(), Some(&Subkind::DIVISION_BY_ZERO));
        assert_eq!(divide(10, 2).unwrap(), 5);
    }
}
