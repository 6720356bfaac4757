use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

// E.164 风格：可选 +，7-15 位数字
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9]{7,15}$").expect("Invalid phone regex"));

static CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid code regex"));

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    // 允许空格与连字符分隔
    let compact: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    if !PHONE_RE.is_match(&compact) {
        return Err("Phone number format is invalid");
    }
    Ok(())
}

/// 机构代码 / 班级代码 / 学号
pub fn validate_code(code: &str) -> Result<(), &'static str> {
    if code.is_empty() || code.len() > 32 {
        return Err("Code length must be between 1 and 32 characters");
    }
    if !CODE_RE.is_match(code) {
        return Err("Code must contain only letters, numbers, underscores or hyphens");
    }
    Ok(())
}

/// 可选联系方式：None 或空白视为未填写
pub fn validate_optional_email(email: Option<&str>) -> Result<(), &'static str> {
    match email.map(str::trim) {
        Some(value) if !value.is_empty() => validate_email(value),
        _ => Ok(()),
    }
}

pub fn validate_optional_phone(phone: Option<&str>) -> Result<(), &'static str> {
    match phone.map(str::trim) {
        Some(value) if !value.is_empty() => validate_phone(value),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(validate_email("parent@example.com").is_ok());
        assert!(validate_email("parent@example").is_err());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn test_phone() {
        assert!(validate_phone("+15551234567").is_ok());
        assert!(validate_phone("555-123 4567").is_ok());
        assert!(validate_phone("12ab").is_err());
        assert!(validate_phone("+1").is_err());
    }

    #[test]
    fn test_code() {
        assert!(validate_code("MATH-101").is_ok());
        assert!(validate_code("").is_err());
        assert!(validate_code("has space").is_err());
    }

    #[test]
    fn test_optional_contacts() {
        assert!(validate_optional_email(None).is_ok());
        assert!(validate_optional_email(Some("  ")).is_ok());
        assert!(validate_optional_email(Some("bad")).is_err());
        assert!(validate_optional_phone(Some("")).is_ok());
        assert!(validate_optional_phone(Some("abc")).is_err());
    }
}
