use std::collections::VecDeque;

/// Hides the `nextPageToken` loop behind a plain iterator: lazy (fetches
/// a page only when the buffer runs dry), finite (stops once the
/// backend returns an empty token), and non-restartable (once consumed,
/// build a new one) (§9 design note).
pub struct PagedResourceIterator<'a, T> {
    fetch_page: Box<dyn FnMut(&str) -> anyhow::Result<(Vec<T>, String)> + 'a>,
    buffer: VecDeque<T>,
    next_token: String,
    done: bool,
}

impl<'a, T> PagedResourceIterator<'a, T> {
    pub fn new(
        fetch_page: impl FnMut(&str) -> anyhow::Result<(Vec<T>, String)> + 'a,
    ) -> Self {
        Self {
            fetch_page: Box::new(fetch_page),
            buffer: VecDeque::new(),
            next_token: String::new(),
            done: false,
        }
    }
}

impl<'a, T> Iterator for PagedResourceIterator<'a, T> {
    type Item = anyhow::Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(Ok(item));
            }
            if self.done {
                return None;
            }

            let token = std::mem::take(&mut self.next_token);
            match (self.fetch_page)(&token) {
                Ok((items, next_token)) => {
                    self.done = next_token.is_empty();
                    self.next_token = next_token;
                    if items.is_empty() {
                        if self.done {
                            return None;
                        }
                        continue;
                    }
                    self.buffer.extend(items);
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_all_pages_lazily() {
        let pages: Vec<(Vec<i32>, String)> = vec![
            (vec![1, 2], "p2".to_string()),
            (vec![3], "p3".to_string()),
            (vec![4, 5], String::new()),
        ];
        let mut pages = pages.into_iter();
        let iter = PagedResourceIterator::new(move |_token| Ok(pages.next().unwrap()));

        let collected: anyhow::Result<Vec<i32>> = iter.collect();
        assert_eq!(collected.unwrap(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn stops_on_empty_page_even_without_token() {
        let mut calls = 0;
        let iter = PagedResourceIterator::new(move |_token| {
            calls += 1;
            Ok::<_, anyhow::Error>((Vec::<i32>::new(), String::new()))
        });
        let collected: Vec<i32> = iter.map(|r| r.unwrap()).collect();
        assert!(collected.is_empty());
    }

    #[test]
    fn propagates_fetch_errors() {
        let iter: PagedResourceIterator<i32> =
            PagedResourceIterator::new(|_token| anyhow::bail!("boom"));
        let results: Vec<_> = iter.collect();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }
}
