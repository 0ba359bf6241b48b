//! Views over each kind of source, compared element by element

use std::cell::{RefCell};
use std::collections::{VecDeque};
use std::rc::{Rc};

use pretty_assertions::assert_eq;

use funview::{Error, View1, View2, View3, View4};

fn collect2<'a, T: Clone + 'a>(v: &View2<'a, T>) -> Vec<Vec<T>> {
    v.rows().unwrap().map(|row| row.iter().unwrap().collect()).collect()
}

#[test]
fn dense_array() {
    let grid = [[1, 2, 3], [4, 5, 6]];
    let v = View2::from_source(&grid);
    assert_eq!(collect2(&v), vec![vec![1, 2, 3], vec![4, 5, 6]]);
    assert_eq!(v.get((0, 3)), None);
    assert_eq!(v.get((2, 0)), None);
}

#[test]
fn slices_and_deques() {
    let boxed: Box<[&str]> = vec!["x", "y"].into_boxed_slice();
    let v = View1::from_source(&boxed);
    assert_eq!(v.iter().unwrap().collect::<Vec<_>>(), vec!["x", "y"]);

    let deques = vec![VecDeque::from(vec![1]), VecDeque::from(vec![2, 3])];
    let w = View2::from_source(&deques[..]);
    assert_eq!(collect2(&w), vec![vec![1], vec![2, 3]]);
}

#[test]
fn shared_list_sees_changes() {
    let list = Rc::new(RefCell::new(vec![vec!["a".to_string()]]));
    let v = View2::from_source(Rc::clone(&list));
    list.borrow_mut()[0].push("b".to_string());
    list.borrow_mut().push(vec!["c".to_string()]);
    assert_eq!(
        collect2(&v),
        vec![vec!["a".to_string(), "b".to_string()], vec!["c".to_string()]],
    );
}

#[test]
fn rank_3_rows_are_views() {
    let cube = vec![vec![vec![1u8, 2], vec![]], vec![vec![3]]];
    let v = View3::from_source(&cube);
    let planes: Vec<Vec<Vec<u8>>> = v.rows().unwrap().map(|plane| collect2(&plane)).collect();
    assert_eq!(planes, cube);
}

#[test]
fn rank_4_leaves() {
    let data = [[[[1, 2]], [[3, 4]]]];
    let v = View4::from_source(&data);
    let leaves: Vec<i32> = v.rows().unwrap()
        .flat_map(|a| a.rows().unwrap().collect::<Vec<_>>())
        .flat_map(|b| b.rows().unwrap().collect::<Vec<_>>())
        .flat_map(|c| c.iter().unwrap().collect::<Vec<_>>())
        .collect();
    assert_eq!(leaves, vec![1, 2, 3, 4]);
}

#[test]
fn unbounded_error_message() {
    let v = View2::from_fn(|(i, j): (usize, usize)| i + j, Default::default());
    let error = v.rows().err();
    assert_eq!(error, Some(Error::Unbounded {rank: 2}));
    assert_eq!(
        error.map(|e| e.to_string()),
        Some("cannot traverse the unbounded first axis of a rank-2 view".to_string()),
    );
}
