//! Signal mask tests.
//!
//! The test harness runs every test on its own thread and the kernel keeps
//! one mask per thread, so tests only see their own changes.

use ksigfd::{SigError, SigmaskHow, Sigmask, SignalSet, Signo};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_block_unblock_restores_mask() {
    init_logger();
    let mask = Sigmask::new();
    let set = SignalSet::from(Signo::SIGUSR1);

    let original = mask.current().unwrap();
    assert!(!original.contains(Signo::SIGUSR1.into()));

    let prev = mask.block(&set).unwrap();
    assert_eq!(prev, original);
    assert!(mask.current().unwrap().contains(Signo::SIGUSR1.into()));

    let prev = mask.unblock(&set).unwrap();
    assert!(prev.contains(Signo::SIGUSR1.into()));
    assert_eq!(mask.current().unwrap(), original);
}

#[test]
fn test_empty_set() {
    init_logger();
    let mask = Sigmask::new();
    let blocked: SignalSet = [Signo::SIGHUP, Signo::SIGALRM].into_iter().collect();
    let original = mask.block(&blocked).unwrap();

    // Block/Unblock with nothing leave the mask alone
    let empty = SignalSet::new();
    assert_eq!(mask.set(SigmaskHow::Block, &empty).unwrap(), blocked.union(original));
    assert_eq!(mask.set(SigmaskHow::Unblock, &empty).unwrap(), blocked.union(original));

    // SetMask with nothing clears it
    let prev = mask.set(SigmaskHow::SetMask, &empty).unwrap();
    assert_eq!(prev, blocked.union(original));
    assert!(mask.current().unwrap().is_empty());

    mask.replace(&original).unwrap();
    assert_eq!(mask.current().unwrap(), original);
}

#[test]
fn test_realtime_signals() {
    init_logger();
    let mask = Sigmask::new();
    let set = SignalSet::try_from_signals([34, 50, 64]).unwrap();

    let original = mask.block(&set).unwrap();
    let current = mask.current().unwrap();
    for signo in set.iter() {
        assert!(current.contains(signo), "signal {signo} not blocked");
    }
    mask.replace(&original).unwrap();
}

#[test]
fn test_unblockable_signals_rejected() {
    init_logger();
    let mask = Sigmask::new();
    let original = mask.current().unwrap();

    let kill = SignalSet::from(Signo::SIGKILL);
    assert_eq!(mask.block(&kill), Err(SigError::InvalidSignal(9)));

    let stop: SignalSet = [Signo::SIGTERM, Signo::SIGSTOP].into_iter().collect();
    assert_eq!(mask.replace(&stop), Err(SigError::InvalidSignal(19)));

    // Nothing was applied
    assert_eq!(mask.current().unwrap(), original);
}

#[test]
fn test_mask_handles_share_state() {
    init_logger();
    let a = Sigmask::new();
    let b = Sigmask::default();
    let set = SignalSet::from(Signo::SIGPROF);

    let original = a.block(&set).unwrap();
    assert!(b.current().unwrap().contains(Signo::SIGPROF.into()));
    b.replace(&original).unwrap();
    assert_eq!(a.current().unwrap(), original);
}

#[test]
fn test_mask_inherited_by_new_threads() {
    init_logger();
    let mask = Sigmask::new();
    let set = SignalSet::from(Signo::SIGXCPU);
    let original = mask.block(&set).unwrap();

    let inherited = std::thread::spawn(|| Sigmask::new().current().unwrap())
        .join()
        .unwrap();
    assert!(inherited.contains(Signo::SIGXCPU.into()));

    mask.replace(&original).unwrap();
}

#[test]
fn test_block_full_set() {
    init_logger();
    let mask = Sigmask::new();
    let original = mask.block(&SignalSet::full()).unwrap();
    assert_eq!(mask.current().unwrap(), SignalSet::full());

    mask.replace(&original).unwrap();
    assert_eq!(mask.current().unwrap(), original);
}
