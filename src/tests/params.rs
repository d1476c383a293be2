use rstest::rstest;

use crate::cli::sweeper::SweeperCliArgs;
use crate::types::params::SweeperParams;

#[rstest]
#[case(0, 1)]
#[case(1, 1)]
#[case(60, 60)]
fn sweep_interval_never_collapses_to_zero(#[case] configured: u64, #[case] effective: u64) {
    let params: SweeperParams =
        SweeperCliArgs { sweep_interval_secs: configured, sweep_batch_size: 100 }.into();
    assert_eq!(params.interval_secs, effective);
}
