// The CLI writes its real output (plans, stack outputs) to stdout, so logs go to stderr.
// File and line are only worth the noise once someone has asked for debug output.
pub fn setup_for_cli(env_filter: &str) {
    let verbose = env_filter.contains("debug") || env_filter.contains("trace");
    tracing_subscriber::fmt()
        .with_file(verbose)
        .with_line_number(verbose)
        .with_target(false)
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .compact()
        .init();
}
