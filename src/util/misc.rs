use std::fmt;

pub type Res<T = ()> = Result<T, Box<dyn std::error::Error>>;

// コマンドラインオプションの値を取得
pub fn next_value<T>(it: &mut std::slice::Iter<'_, String>, opt: &str) -> Res<T>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    let n = it.next().ok_or_else(|| format!("{}: value missing", opt))?;
    let v = n
        .parse::<T>()
        .map_err(|e| format!("{}: {} '{}'", opt, e, n))?;
    Ok(v)
}

pub fn vec_count<T: PartialEq>(v: &[T], e: &T) -> usize {
    v.iter().filter(|&n| n == e).count()
}

pub fn vec_to_string<T: fmt::Display>(v: &[T]) -> String {
    let vs: Vec<String> = v.iter().map(|x| format!("{}", x)).collect();
    "[".to_string() + &vs.join(", ") + "]"
}

// 各リストから1つずつ選ぶ組み合わせをすべて返却
// 空のリストが含まれる場合は組み合わせなし
pub fn cartesian_product<T>(vv: &[Vec<T>]) -> Vec<Vec<&T>> {
    let mut res: Vec<Vec<&T>> = vec![vec![]];
    for v in vv {
        let mut next = Vec::with_capacity(res.len() * v.len());
        for prefix in &res {
            for e in v {
                let mut p = prefix.clone();
                p.push(e);
                next.push(p);
            }
        }
        res = next;
    }
    res
}

#[test]
fn test_cartesian_product() {
    let vv = vec![vec![1, 2], vec![3], vec![4, 5]];
    let res = cartesian_product(&vv);
    assert_eq!(res.len(), 4);
    assert_eq!(res[0], vec![&1, &3, &4]);
    assert_eq!(res[3], vec![&2, &3, &5]);

    let empty: Vec<Vec<i32>> = vec![vec![1], vec![]];
    assert!(cartesian_product(&empty).is_empty());
}

#[test]
fn test_vec_count() {
    assert_eq!(vec_count(&[1, 2, 1, 3], &1), 2);
    assert_eq!(vec_to_string(&[1, 2]), "[1, 2]");
}
