//! Fully qualified names of the annotations and types the catalog refers to.

/// `jakarta.persistence.Entity`.
pub const ENTITY: &str = "jakarta.persistence.Entity";
/// `jakarta.persistence.PrePersist`.
pub const PRE_PERSIST: &str = "jakarta.persistence.PrePersist";
/// `jakarta.persistence.PreUpdate`.
pub const PRE_UPDATE: &str = "jakarta.persistence.PreUpdate";
/// `jakarta.persistence.PostPersist`.
pub const POST_PERSIST: &str = "jakarta.persistence.PostPersist";
/// `jakarta.persistence.PostUpdate`.
pub const POST_UPDATE: &str = "jakarta.persistence.PostUpdate";

/// JPA entity lifecycle callbacks checked by the lifecycle rule.
pub const LIFE_CYCLE_CALLBACKS: &[&str] = &[PRE_PERSIST, PRE_UPDATE, POST_PERSIST, POST_UPDATE];

/// `org.springframework.stereotype.Repository`.
pub const REPOSITORY: &str = "org.springframework.stereotype.Repository";
/// `org.springframework.stereotype.Service`.
pub const SERVICE: &str = "org.springframework.stereotype.Service";
/// `org.springframework.stereotype.Controller`.
pub const CONTROLLER: &str = "org.springframework.stereotype.Controller";
/// `org.springframework.web.bind.annotation.RestController`, meta-annotated with [`CONTROLLER`].
pub const REST_CONTROLLER: &str = "org.springframework.web.bind.annotation.RestController";
/// `org.springframework.transaction.annotation.Transactional`.
pub const TRANSACTIONAL: &str = "org.springframework.transaction.annotation.Transactional";

/// Package of JUnit 4 (JUnit 5 lives in `org.junit.jupiter`).
pub const JUNIT_4_PACKAGE: &str = "org.junit";
/// The legacy date type.
pub const JAVA_UTIL_DATE: &str = "java.util.Date";
