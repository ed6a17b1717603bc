//! Concurrency tests: many threads issuing accessor calls against
//! independent documents through the shared default pool must see exactly
//! the results sequential execution would produce.

use jsonpick::{ParserPool, exists, get_int, get_string};

fn document_for(thread: usize, iteration: usize) -> String {
    format!(
        r#"{{"thread": {thread}, "items": [{iteration}, {}, {}], "tag": "t{thread}-{iteration}"}}"#,
        iteration * 2,
        iteration * 3,
    )
}

#[test]
fn parallel_accessors_match_sequential_results() {
    const THREADS: usize = 8;
    const ITERATIONS: usize = 200;

    std::thread::scope(|scope| {
        for thread in 0..THREADS {
            scope.spawn(move || {
                for iteration in 0..ITERATIONS {
                    let doc = document_for(thread, iteration);
                    let data = doc.as_bytes();

                    assert_eq!(get_int(data, &["thread"]), thread as i64);
                    assert_eq!(get_int(data, &["items", "2"]), (iteration * 3) as i64);
                    assert_eq!(get_string(data, &["tag"]), format!("t{thread}-{iteration}"));
                    assert!(exists(data, &["items", "0"]));
                    assert!(!exists(data, &["missing"]));
                }
            });
        }
    });
}

#[test]
fn parallel_failures_do_not_disturb_successes() {
    std::thread::scope(|scope| {
        // Half the threads hammer the pool with garbage,
        // the other half read real documents.
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..300 {
                    assert_eq!(get_int(b"{\"broken\":", &["broken"]), 0);
                    assert!(!exists(b"%%%", &["x"]));
                }
            });
        }
        for thread in 0..4 {
            scope.spawn(move || {
                for i in 0..300 {
                    let doc = document_for(thread, i);
                    assert_eq!(get_int(doc.as_bytes(), &["items", "0"]), i as i64);
                }
            });
        }
    });
}

#[test]
fn shared_explicit_pool_survives_contention() {
    let pool = ParserPool::with_capacity(4);

    std::thread::scope(|scope| {
        for thread in 0..16 {
            let pool = &pool;
            scope.spawn(move || {
                for i in 0..100 {
                    let mut parser = pool.get();
                    let doc = document_for(thread, i);
                    let root = parser.parse(&doc).unwrap();
                    assert_eq!(root.get(&["thread"]).unwrap().as_i64(), Some(thread as i64));
                }
            });
        }
    });

    let stats = pool.stats();
    assert_eq!(stats.parsers_created + stats.parsers_reused, 1600);
    assert!(stats.idle <= 4);
}
