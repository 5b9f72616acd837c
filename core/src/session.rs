/// ブラウザセッション相当の認証状態。
///
/// This is a placeholder gate, not real security: the password lives in
/// plain configuration and is compared as-is.
#[derive(Debug)]
pub struct Session {
    password: String,
    authenticated: bool,
}

impl Session {
    pub fn start(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            authenticated: false,
        }
    }

    pub fn authenticate(&mut self, input: &str) -> bool {
        if input != self.password {
            return false;
        }
        self.authenticated = true;
        true
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn end(&mut self) {
        self.authenticated = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_lifecycle() {
        let mut session = Session::start("3737");
        assert!(!session.is_authenticated());

        assert!(!session.authenticate("0000"));
        assert!(!session.is_authenticated());

        assert!(session.authenticate("3737"));
        assert!(session.is_authenticated());

        session.end();
        assert!(!session.is_authenticated());
    }
}
