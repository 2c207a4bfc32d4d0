use std::fs;

use tokenize::{corpus, EncodeError, FileStream, StreamConfig, Symbol, TargetOffset};

fn write(dir: &std::path::Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).unwrap();
}

#[test]
fn yields_duplicated_inputs_of_the_configured_shape() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "long.story", corpus::BEATLES);
    write(dir.path(), "short.story", "hi");
    write(dir.path(), "ignored.txt", corpus::BEATLES);

    let cfg = StreamConfig::new(8, dir.path(), ".story", 4).with_seed(11);
    let stream = FileStream::new(cfg).unwrap();
    assert_eq!(stream.files().len(), 2);
    let width = stream.vocab().target_width();
    assert_eq!(width, 104);

    for batch in stream.take(5) {
        let batch = batch.unwrap();
        let [a, b] = &batch.inputs;
        assert_eq!(a, b);
        assert_eq!(a.shape(), &[4, 8]);
        assert_eq!(batch.targets.shape(), &[4, 8, width]);
        for row in batch.targets.outer_iter() {
            for pos in row.outer_iter() {
                assert_eq!(pos.sum(), 1.0);
            }
        }
    }
}

#[test]
fn same_seed_same_samples() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.story", corpus::BEATLES);
    let first = |seed| {
        let cfg = StreamConfig::new(6, dir.path(), ".story", 3).with_seed(seed);
        FileStream::new(cfg).unwrap().next().unwrap().unwrap()
    };
    assert_eq!(first(3), first(3));
}

#[test]
fn threshold_counts_max_len_plus_batch_size() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "edge.story", "abcdefg");

    // 7 chars: usable when max_len + batch_size <= 7.
    let ok = StreamConfig::new(4, dir.path(), ".story", 3).with_seed(1);
    assert!(FileStream::new(ok).unwrap().next().is_some());

    let short = StreamConfig::new(4, dir.path(), ".story", 4).with_seed(1);
    assert!(FileStream::new(short).unwrap().next().is_none());
}

#[test]
fn single_offset_stream() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.story", corpus::BEATLES);
    let mut cfg = StreamConfig::new(5, dir.path(), ".story", 2).with_seed(2);
    cfg.encode.offset = TargetOffset::Single;
    let batch = FileStream::new(cfg).unwrap().next().unwrap().unwrap();
    assert_eq!(batch.targets.shape(), &[2, 5, 104]);
}

#[test]
fn round_robin_keeps_going() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.story", corpus::BEATLES);
    write(dir.path(), "b.story", corpus::BEATLES);
    let cfg = StreamConfig::new(10, dir.path(), ".story", 2).with_seed(5);
    let pulled = FileStream::new(cfg)
        .unwrap()
        .take(7)
        .filter(Result::is_ok)
        .count();
    assert_eq!(pulled, 7);
}

#[test]
fn files_are_visited_in_round_robin_order() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.story", &"a".repeat(30));
    write(dir.path(), "m.story", "m");
    write(dir.path(), "z.story", &"z".repeat(30));

    let stream = FileStream::new(StreamConfig::new(2, dir.path(), ".story", 3).with_seed(4))
        .unwrap();
    let vocab = stream.vocab().clone();
    let hot = |letter: char, batch: &tokenize::StreamBatch| {
        let id = vocab.id(&Symbol::Char(letter)) as usize;
        batch
            .targets
            .iter()
            .skip(id)
            .step_by(vocab.target_width())
            .any(|&v| v == 1.0)
    };

    // "m.story" is shorter than max_len + batch_size and never shows up.
    let order: Vec<char> = stream
        .take(6)
        .map(|batch| {
            let batch = batch.unwrap();
            assert!(!hot('m', &batch));
            match (hot('a', &batch), hot('z', &batch)) {
                (true, false) => 'a',
                (false, true) => 'z',
                other => panic!("batch mixes files: {other:?}"),
            }
        })
        .collect();
    assert_eq!(order, vec!['a', 'z', 'a', 'z', 'a', 'z']);
}

#[test]
fn nothing_usable_ends_the_stream() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "tiny.story", "x");
    let mut stream = FileStream::new(StreamConfig::new(10, dir.path(), ".story", 2)).unwrap();
    assert!(stream.next().is_none());
    assert!(stream.next().is_none());

    let empty = tempfile::tempdir().unwrap();
    let mut stream = FileStream::new(StreamConfig::new(10, empty.path(), ".story", 2)).unwrap();
    assert!(stream.files().is_empty());
    assert!(stream.next().is_none());
}

#[test]
fn missing_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = StreamConfig::new(4, dir.path().join("absent"), ".story", 2);
    assert!(matches!(FileStream::new(cfg), Err(EncodeError::Io { .. })));
}

#[test]
fn unreadable_file_is_yielded_as_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bad.story"), [0xff, 0xfe, 0xfd]).unwrap();
    write(dir.path(), "good.story", corpus::BEATLES);
    let cfg = StreamConfig::new(4, dir.path(), ".story", 2).with_seed(0);
    let mut stream = FileStream::new(cfg).unwrap();
    assert!(matches!(stream.next(), Some(Err(EncodeError::Io { .. }))));
    assert!(matches!(stream.next(), Some(Ok(_))));
}
