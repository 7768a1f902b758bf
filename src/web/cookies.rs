use poem::web::cookie::{Cookie, PrivateCookieJar};

use crate::prelude::*;

pub struct Builder(Cookie);

impl Builder {
    pub fn new(name: impl Into<String>) -> Self {
        let mut cookie = Cookie::named(name);
        cookie.set_path("/");
        cookie.set_http_only(true);
        Self(cookie)
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.0.set_value_str(value);
        self
    }

    pub fn max_age(mut self, max_age: StdDuration) -> Self {
        self.0.set_max_age(max_age);
        self
    }

    #[allow(clippy::missing_const_for_fn)]
    pub fn build(self) -> Cookie {
        self.0
    }

    pub fn add_to(self, jar: &PrivateCookieJar<'_>) {
        jar.add(self.build());
    }
}
