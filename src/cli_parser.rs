//! Help text for nccl-test-runner.

/// Print usage information.
pub fn print_usage() {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!(
        "nccl-test-runner v{}
Submit an NCCL RDMA benchmark Job to a GKE GPU node pool.

USAGE:
    nccl-test-runner [OPTIONS]

OPTIONS:
    --nodepool-name <NAME>   Node pool to run on (default: terraform output nodepool_name)
    --num-nodes <N>          Number of nodes (default: live count of nodes matching
                             the configured node selector)
    --gpus-per-node <N>      GPUs per node (default: terraform output gpus_per_node)
    -h, --help               Show this help message
    -V, --version            Show version information

Values may also be given as --flag=value. Any other argument is rejected.

EXAMPLES:
    nccl-test-runner
    nccl-test-runner --nodepool-name a3-ultra-gpu-pool --num-nodes 2 --gpus-per-node 8

ENVIRONMENT:
    NCCL_TEST_CONFIG         TOML config file
    NCCL_TEST_TEMPLATE       Job manifest template (default: built-in NCCL all-gather Job)
    NCCL_TEST_TERRAFORM_DIR  Terraform working directory (default: .)
    NCCL_TEST_NAMESPACE      Namespace for the Job (default: current context)
    NCCL_TEST_NODE_SELECTOR  Selector for the node count
                             (default: cloud.google.com/gke-nodepool=a3-ultra-gpu-pool)
    NCCL_TEST_JOB_LABEL      Selector for finding the Job (default: job-name=nccl-test)
    NCCL_TEST_KUBECTL        kubectl binary (default: kubectl)
    NCCL_TEST_TERRAFORM      terraform binary (default: terraform)
    NCCL_TEST_TIMEOUT_SECS   Timeout per external command (default: 120)
    NCCL_TEST_LOG_FORMAT     Set to 'json' for JSON logs
    RUST_LOG                 Log level (debug, info, warn, error)

EXIT CODES:
    0  Job submitted
    1  terraform or kubectl failed
    2  Configuration error
    3  terraform or kubectl timed out
",
        version
    );
}
