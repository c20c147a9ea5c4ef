// Copyright 2024-2026 nccl-test-runner Contributors
// SPDX-License-Identifier: Apache-2.0

//! Operator-facing report printed after a successful submission.

use std::io::{self, Write};

use crate::error::RunnerError;
use crate::launcher::Submission;

/// Write the Job name and the follow-up commands.
///
/// The report is part of a successful run, so a write failure is an error.
pub fn write_report<W: Write>(out: &mut W, submission: &Submission) -> Result<(), RunnerError> {
    write_lines(out, submission).map_err(RunnerError::Report)
}

fn write_lines<W: Write>(out: &mut W, submission: &Submission) -> io::Result<()> {
    let [describe, logs, delete] = submission.follow_up_commands();
    writeln!(out, "Submitted job: {}", submission.job_name)?;
    writeln!(out)?;
    writeln!(out, "Describe:  {}", describe)?;
    writeln!(out, "Logs:      {}", logs)?;
    writeln!(out, "Delete:    {}", delete)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TestParams;

    fn submission(namespace: Option<&str>) -> Submission {
        Submission {
            job_name: "nccl-test".to_string(),
            params: TestParams {
                nodepool_name: "pool-a".to_string(),
                num_nodes: 4,
                gpus_per_node: 8,
            },
            manifest: String::new(),
            namespace: namespace.map(str::to_string),
        }
    }

    #[test]
    fn test_report_lists_job_and_commands() {
        let mut buf = Vec::new();
        write_report(&mut buf, &submission(None)).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "Submitted job: nccl-test\n\n\
             Describe:  kubectl describe job/nccl-test\n\
             Logs:      kubectl logs -f job/nccl-test\n\
             Delete:    kubectl delete job/nccl-test\n"
        );
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_report_write_failure_is_an_error() {
        let err = write_report(&mut ClosedPipe, &submission(None)).unwrap_err();
        assert!(matches!(err, RunnerError::Report(_)));
        assert_eq!(err.exit_code(), 1);
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_report_with_namespace() {
        let mut buf = Vec::new();
        write_report(&mut buf, &submission(Some("bench"))).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("kubectl delete job/nccl-test -n bench\n"));
    }
}
