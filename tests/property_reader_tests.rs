//! Integration tests for reading property files from disk.

#![cfg(feature = "properties")]

use std::io::Write;

use fncore::control::{FailureKind, Outcome};
use fncore::properties::{PropertyError, PropertyReader};
use rstest::rstest;
use tempfile::NamedTempFile;

fn write_properties(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[rstest]
fn test_reads_values_from_file() {
    let file = write_properties("# settings\nhost=example.org\nid = 42\nlist=1,2,3\n");
    let reader = PropertyReader::from_file(file.path());

    assert_eq!(reader.read_as_string("host"), Outcome::success("example.org".to_string()));
    assert_eq!(reader.read_as_int("id"), Outcome::success(42));
    assert_eq!(
        reader.read_as_list_of_int("list").map(|list| list.to_vec()),
        Outcome::success(vec![1, 2, 3])
    );
}

#[rstest]
fn test_missing_file_fails_every_read() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("absent.properties");
    let reader = PropertyReader::from_file(&path);

    for outcome in [reader.read_as_string("host"), reader.read_as_string("other")] {
        match outcome {
            Outcome::Failure(failure) => {
                assert_eq!(failure.kind(), FailureKind::External);
                let cause = failure.cause().unwrap();
                assert!(cause.downcast_ref::<PropertyError>().is_some());
            }
            other => panic!("expected a failure, got {other:?}"),
        }
    }
}

#[rstest]
fn test_building_a_record_from_properties() {
    #[derive(Debug, PartialEq)]
    struct Person {
        id: i64,
        first_name: String,
        last_name: String,
    }

    let file = write_properties("id=3\nfirstName=Jane\nlastName=Doe\n");
    let reader = PropertyReader::from_file(file.path());
    let person = reader.read_as_int("id").flat_map(|id| {
        reader.read_as_string("firstName").flat_map(|first_name| {
            reader
                .read_as_string("lastName")
                .map(|last_name| Person { id, first_name, last_name })
        })
    });

    assert_eq!(
        person,
        Outcome::success(Person {
            id: 3,
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
        })
    );
}
