use url::Url;

const SEP: char = '/';

/// URL under construction, path segments are appended one call at a time.
#[derive(Clone)]
pub struct Resource {
    url: Url,
}

impl Resource {
    pub fn append_path(&mut self, path: &str) -> &mut Self {
        if let Some(segments) = self.url.path_segments() {
            let mut joined = segments
                .chain(path.split(SEP))
                .filter(|x| !x.is_empty())
                .collect::<Vec<_>>()
                .join("/");
            if path.ends_with(SEP) {
                joined.push(SEP);
            }
            self.url.set_path(&joined);
        } else if let Ok(u) = self.url.join(path) {
            self.url = u;
        }
        self
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl From<Url> for Resource {
    fn from(url: Url) -> Self {
        Resource { url }
    }
}
