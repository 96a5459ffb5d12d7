/// Asserts that the provided block panics, optionally checking that the panic message contains
/// the provided text. The panic is caught, so the surrounding test keeps running.
#[allow(unused_macros)]
macro_rules! assert_panics {
    ($run:block) => {
        assert_panics!($run, "assertion failed to panic")
    };
    ($run:block, $msg:literal) => {
        assert!(std::panic::catch_unwind(|| $run).is_err(), $msg);
        println!("^ panic caught");
    };
    ($run:block, contains $text:expr) => {
        match std::panic::catch_unwind(|| $run) {
            Ok(_) => panic!("assertion failed to panic"),
            Err(payload) => {
                let message = payload.downcast_ref::<String>()
                    .map(String::as_str)
                    .or_else(|| payload.downcast_ref::<&str>().copied())
                    .unwrap_or_default();
                assert!(
                    message.contains($text),
                    "panic message {message:?} should contain {:?}", $text
                );
                println!("^ panic caught");
            },
        }
    };
}

#[allow(unused_imports)]
pub(crate) use assert_panics;
