// Text views for each page. Every function rebuilds its whole frame.
use std::fmt::Write;

use super::achievements::medal_style;
use super::filter::filter_items;
use super::format::{format_brl, format_opt_date, month_name};
use super::table::TextTable;
use crate::models::{Achievement, AdminStats, Dashboard, Goal, Group, MemberStats, Transaction, User};

pub const NO_TRANSACTIONS: &str = "Nenhuma movimentação registrada.";
pub const NO_GOAL: &str = "Nenhuma meta ativa. Crie uma meta para acompanhar seu progresso.";
pub const NO_MEMBERS: &str = "Nenhum membro neste grupo.";
pub const NO_MATCHING_MEMBERS: &str = "Nenhum membro encontrado para a busca.";
pub const NO_USERS: &str = "Nenhum usuário cadastrado.";
pub const NO_MATCHING_USERS: &str = "Nenhum usuário encontrado para a busca.";
pub const NO_STATS: &str = "Nenhuma movimentação neste mês.";
pub const NO_ACHIEVEMENTS: &str = "Nenhuma conquista ainda. Continue registrando suas finanças!";

pub fn transactions_table(transactions: &[Transaction]) -> String {
    let mut table = TextTable::new(
        ["DATA", "DESCRIÇÃO", "TIPO", "VALOR", "RESPONSÁVEL"],
        NO_TRANSACTIONS,
    );
    for t in transactions {
        table.row([
            format_opt_date(t.data_transacao.as_deref()),
            t.descricao.clone(),
            t.tipo.label().to_string(),
            format_brl(t.valor),
            t.responsavel_nome.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    table.render()
}

/// Card for the group's active goal
pub fn goal_card(goal: Option<&Goal>) -> String {
    let Some(goal) = goal else {
        return format!("{}\n", NO_GOAL);
    };

    let pct = goal.progress_percent();
    let filled = (pct.clamp(0, 100) / 5) as usize;
    let mut out = String::new();
    let _ = writeln!(out, "Meta: {}", goal.titulo);
    let _ = writeln!(
        out,
        "[{}{}] {}%",
        "#".repeat(filled),
        ".".repeat(20 - filled),
        pct
    );
    let _ = writeln!(
        out,
        "{} de {}",
        format_brl(goal.valor_atual),
        format_brl(goal.valor_meta)
    );
    if let Some(limit) = goal.data_limite.as_deref() {
        let _ = writeln!(out, "Prazo: {}", format_opt_date(Some(limit)));
    }
    out
}

pub fn dashboard(view: &Dashboard) -> String {
    let mut out = String::new();
    let plan = view.plano.as_deref().unwrap_or("gratuito");
    let _ = writeln!(out, "{} (plano {})", view.nome_grupo, plan);
    let _ = writeln!(out);
    let _ = writeln!(out, "Saldo:          {}", format_brl(view.saldo_total));
    let _ = writeln!(out, "Ganhos:         {}", format_brl(view.total_ganhos));
    let _ = writeln!(out, "Gastos:         {}", format_brl(view.total_gastos));
    let _ = writeln!(out, "Investimentos:  {}", format_brl(view.total_investimentos));
    let _ = writeln!(out);
    out.push_str(&goal_card(view.meta_ativa.as_ref()));
    let _ = writeln!(out);
    let _ = writeln!(out, "Movimentações recentes");
    out.push_str(&transactions_table(&view.movimentacoes));
    out
}

/// Member table after applying the live search query
pub fn group_members(group: &Group, query: &str) -> String {
    let mut out = String::new();
    let plan = group.plano.as_deref().unwrap_or("gratuito");
    let _ = writeln!(out, "{} (plano {})", group.nome_grupo, plan);

    let empty = if group.membros.is_empty() {
        NO_MEMBERS
    } else {
        NO_MATCHING_MEMBERS
    };
    let mut table = TextTable::new(["", "ID", "NOME", "EMAIL", "PAPEL"], empty);
    for member in filter_items(&group.membros, query) {
        let you = group.current_user_id.as_deref() == Some(member.id.as_str());
        table.row([
            if you { "*".to_string() } else { String::new() },
            member.id.clone(),
            member.nome.clone(),
            member.email.clone(),
            if member.is_owner() { "Dono" } else { "Membro" }.to_string(),
        ]);
    }
    out.push_str(&table.render());
    out
}

/// One card per member for the selected month
pub fn member_stats(year: i32, month: u32, stats: &[MemberStats]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Resumo de {} de {}", month_name(month), year);
    if stats.is_empty() {
        let _ = writeln!(out, "{}", NO_STATS);
        return out;
    }
    for s in stats {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", s.member_name);
        let _ = writeln!(out, "  Ganhos:         {}", format_brl(s.ganhos));
        let _ = writeln!(out, "  Gastos:         {}", format_brl(s.gastos));
        let _ = writeln!(out, "  Investimentos:  {}", format_brl(s.investimentos));
    }
    out
}

pub fn admin_stats(stats: &AdminStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Usuários:       {}", stats.total_users);
    let _ = writeln!(out, "Premium:        {}", stats.premium_users);
    let _ = writeln!(out, "Grupos:         {}", stats.total_groups);
    let _ = writeln!(out, "Movimentações:  {}", stats.total_transactions);
    out
}

/// User list after applying the live search query to the full cached list
pub fn user_list(users: &[User], query: &str) -> String {
    if users.is_empty() {
        return format!("{}\n", NO_USERS);
    }
    let mut table = TextTable::new(["ID", "NOME", "EMAIL", "PLANO", "CRIADO EM"], NO_MATCHING_USERS);
    for user in filter_items(users, query) {
        table.row([
            user.id.clone(),
            user.nome.clone(),
            user.email.clone(),
            user.plano.clone().unwrap_or_else(|| "-".to_string()),
            format_opt_date(user.criado_em.as_deref()),
        ]);
    }
    table.render()
}

pub fn user_detail(user: &User) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} <{}>", user.nome, user.email);
    let _ = writeln!(out, "ID:        {}", user.id);
    let _ = writeln!(out, "Plano:     {}", user.plano.as_deref().unwrap_or("-"));
    let _ = writeln!(out, "Criado em: {}", format_opt_date(user.criado_em.as_deref()));
    let _ = writeln!(out);
    out.push_str(&transactions_table(&user.movimentacoes));
    out
}

pub fn profile(user: &User) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Nome:      {}", user.nome);
    let _ = writeln!(out, "Email:     {}", user.email);
    let _ = writeln!(out, "Plano:     {}", user.plano.as_deref().unwrap_or("gratuito"));
    let _ = writeln!(out, "Membro desde: {}", format_opt_date(user.criado_em.as_deref()));
    out
}

pub fn achievements(items: &[Achievement]) -> String {
    if items.is_empty() {
        return format!("{}\n", NO_ACHIEVEMENTS);
    }
    let mut out = String::new();
    for a in items {
        let style = medal_style(&a.tipo_medalha);
        let _ = writeln!(
            out,
            "{} [{}] {} ({})",
            style.glyph,
            style.color_class,
            a.descricao,
            format_opt_date(a.data_conquista.as_deref())
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn empty_dashboard_uses_placeholders() {
        let out = dashboard(&Dashboard {
            nome_grupo: "Casa".to_string(),
            ..Default::default()
        });
        assert!(out.contains(NO_GOAL));
        assert!(out.contains(NO_TRANSACTIONS));
        assert!(out.contains("Saldo:          R$ 0,00"));
    }

    #[test]
    fn goal_card_shows_rounded_progress() {
        let goal = Goal {
            titulo: "Viagem".to_string(),
            valor_meta: Decimal::from(1000),
            valor_atual: Decimal::from(333),
            data_limite: Some("2025-12-31".to_string()),
        };
        let out = goal_card(Some(&goal));
        assert!(out.contains("Meta: Viagem"));
        assert!(out.contains("] 33%"));
        assert!(out.contains("R$ 333,00 de R$ 1.000,00"));
        assert!(out.contains("Prazo: 31/12/2025"));
    }

    #[test]
    fn stats_cards_one_per_member() {
        let stats = vec![
            MemberStats {
                member_name: "Ana".to_string(),
                ganhos: Decimal::new(500050, 2),
                gastos: Decimal::from(120),
                investimentos: Decimal::ZERO,
            },
            MemberStats {
                member_name: "Bia".to_string(),
                ganhos: Decimal::ZERO,
                gastos: Decimal::ZERO,
                investimentos: Decimal::from(10),
            },
        ];
        let out = member_stats(2024, 3, &stats);
        assert!(out.starts_with("Resumo de Março de 2024"));
        assert!(out.contains("  Ganhos:         R$ 5.000,50"));
        assert!(out.contains("  Investimentos:  R$ 10,00"));
        assert_eq!(out.matches("  Gastos:").count(), 2);

        assert!(member_stats(2024, 3, &[]).contains(NO_STATS));
    }

    #[test]
    fn unmatched_search_shows_message() {
        let users = vec![User {
            id: "1".to_string(),
            nome: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            plano: Some("premium".to_string()),
            criado_em: None,
            is_admin: false,
            movimentacoes: vec![],
        }];
        assert_eq!(user_list(&users, "zzz"), format!("{}\n", NO_MATCHING_USERS));
        assert!(user_list(&users, "ANA").contains("ana@x.com"));
        assert_eq!(user_list(&[], ""), format!("{}\n", NO_USERS));
    }
}
