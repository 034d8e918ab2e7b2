use futures::Stream;
use futures::TryStreamExt;

/// Joins already serialized JSON values into one JSON array.
///
/// Values are written as they are; an empty stream gives `[]`.
/// Empty values are absent values on the ledger and are skipped.
pub async fn json_array<S, E>(values: S) -> Result<Vec<u8>, E>
where
    S: Stream<Item = Result<Vec<u8>, E>>,
{
    let (mut buf, _cnt): (Vec<u8>, usize) = values
        .try_fold((vec![b'['], 0), |(mut buf, cnt), val| async move {
            if val.is_empty() {
                return Ok((buf, cnt));
            }
            if 0 < cnt {
                buf.push(b',');
            }
            buf.extend_from_slice(&val);
            Ok((buf, cnt + 1))
        })
        .await?;
    buf.push(b']');
    Ok(buf)
}

#[cfg(test)]
mod test_render {
    mod json_array {
        use crate::store::render::json_array;

        #[tokio::test]
        async fn empty() {
            let s = futures::stream::iter(Vec::<Result<Vec<u8>, ()>>::new());
            let got: Vec<u8> = json_array(s).await.unwrap();
            assert_eq!(b"[]".to_vec(), got);
        }

        #[tokio::test]
        async fn many() {
            let s = futures::stream::iter(vec![
                Ok::<_, ()>(br#"{"a":1}"#.to_vec()),
                Ok(b"2".to_vec()),
                Ok(br#""three""#.to_vec()),
            ]);
            let got: Vec<u8> = json_array(s).await.unwrap();
            assert_eq!(br#"[{"a":1},2,"three"]"#.to_vec(), got);
            let parsed: serde_json::Value = serde_json::from_slice(&got).unwrap();
            assert_eq!(3, parsed.as_array().unwrap().len());
        }

        #[tokio::test]
        async fn empty_value_first() {
            let s = futures::stream::iter(vec![
                Ok::<_, ()>(vec![]),
                Ok(b"{}".to_vec()),
                Ok(b"{}".to_vec()),
            ]);
            let got: Vec<u8> = json_array(s).await.unwrap();
            assert_eq!(b"[{},{}]".to_vec(), got);
        }

        #[tokio::test]
        async fn empty_value_last() {
            let s = futures::stream::iter(vec![Ok::<_, ()>(b"{}".to_vec()), Ok(vec![])]);
            let got: Vec<u8> = json_array(s).await.unwrap();
            assert_eq!(b"[{}]".to_vec(), got);
            let parsed: serde_json::Value = serde_json::from_slice(&got).unwrap();
            assert_eq!(1, parsed.as_array().unwrap().len());
        }

        #[tokio::test]
        async fn only_empty_values() {
            let s = futures::stream::iter(vec![Ok::<_, ()>(vec![]), Ok(vec![])]);
            let got: Vec<u8> = json_array(s).await.unwrap();
            assert_eq!(b"[]".to_vec(), got);
        }

        #[tokio::test]
        async fn stops_on_error() {
            let s = futures::stream::iter(vec![
                Ok(b"1".to_vec()),
                Err("broken"),
                Ok(b"3".to_vec()),
            ]);
            let got = json_array(s).await;
            assert_eq!(Err("broken"), got);
        }
    }
}
