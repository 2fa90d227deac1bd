/// Valida um identificador de entidade (aluno, turma, módulo)
///
/// Ids vêm de sistemas externos no estilo de chaves de documento: 1 a 128
/// caracteres, apenas letras, dígitos, sublinhado ou hífen.
pub fn validate_entity_id(id: &str) -> Result<(), &'static str> {
    if id.is_empty() {
        return Err("id must not be empty");
    }
    if id.len() > 128 {
        return Err("id must be at most 128 characters");
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err("id must contain only letters, numbers, underscores or hyphens");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_document_style_ids() {
        assert!(validate_entity_id("aluno-1").is_ok());
        assert!(validate_entity_id("Turma_2025A").is_ok());
        assert!(validate_entity_id("x").is_ok());
    }

    #[test]
    fn test_rejects_invalid_ids() {
        assert!(validate_entity_id("").is_err());
        assert!(validate_entity_id("aluno 1").is_err());
        assert!(validate_entity_id("turma/1").is_err());
        assert!(validate_entity_id(&"a".repeat(129)).is_err());
    }
}
